use uwl::Stream;

/// Consumes `prefix` from the front of the stream. Leaves the stream untouched on a miss.
pub fn find_prefix(stream: &mut Stream<'_>, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }

    let peeked = stream.peek_for_char(prefix.chars().count());
    if prefix == peeked {
        stream.increment(prefix.len());
        return true;
    }

    false
}

/// Splits `<prefix><command> <rest>` into the command word and the rest.
pub fn parse_command<'a>(content: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let mut stream = Stream::new(content);
    stream.take_while_char(char::is_whitespace);

    if !find_prefix(&mut stream, prefix) {
        return None;
    }

    let name = stream.take_until_char(char::is_whitespace);
    if name.is_empty() {
        return None;
    }
    stream.take_while_char(char::is_whitespace);

    Some((name, stream.rest()))
}
