/// Split text into whitespace-delimited tokens.
///
/// Runs of whitespace (any Unicode `White_Space` character) act as a single
/// separator, and leading or trailing whitespace never produces an empty token.
/// Tokens are borrowed slices of the input: no case folding, no punctuation
/// stripping.
pub fn split(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}
