use crate::constants::is_key_tag;
use crate::decode::cursor::Cursor;
use crate::error::DecodeError;
use crate::value::Key;

/// Reads one array or property key. Keys never touch the reference table.
pub(crate) fn read_key(cursor: &mut Cursor<'_>) -> Result<Key, DecodeError> {
    let (tag, position) = cursor.read_type_tag()?;
    if !is_key_tag(tag) {
        return Err(DecodeError::BadKeyType {
            tag: tag as char,
            position,
        });
    }
    if tag == b'i' {
        return cursor.read_int().map(Key::Int);
    }
    let len = cursor.read_length(b'"')?;
    let key = cursor.read_string(len, b"\";")?;
    Ok(Key::Str(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("i:3;", Key::Int(3))]
    #[case("i:-1;", Key::Int(-1))]
    #[case("s:3:\"foo\";", Key::from("foo"))]
    #[case("s:0:\"\";", Key::from(""))]
    fn reads_keys(#[case] input: &str, #[case] expected: Key) {
        let mut cursor = Cursor::new(input);
        assert_eq!(read_key(&mut cursor).unwrap(), expected);
        assert!(cursor.is_at_end());
    }

    #[rstest]
    #[case("d:1.5;", 'd')]
    #[case("N;", 'N')]
    #[case("a:0:{}", 'a')]
    fn rejects_non_scalar_keys(#[case] input: &str, #[case] tag: char) {
        let mut cursor = Cursor::new(input);
        assert_eq!(
            read_key(&mut cursor),
            Err(DecodeError::BadKeyType { tag, position: 0 })
        );
    }
}
