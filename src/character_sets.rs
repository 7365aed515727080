/// Characters stripped from both ends of a parameter value:
/// space, tab, newline, carriage return, NUL and vertical tab
pub fn is_param_trim_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

/// Host character class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostByte {
    /// Not allowed in a registered name
    Invalid,
    /// a-z, 0-9, `.`, `-`
    Valid,
    /// A-Z, needs lowercasing
    Upper,
}

/// Site root hostname classification: 0=invalid, 1=valid, 2=uppercase
const HOSTNAME_CHAR_TABLE: [u8; 128] = {
    let mut table = [0u8; 128];

    let mut i = b'a';
    while i <= b'z' {
        table[i as usize] = 1;
        i += 1;
    }
    let mut i = b'0';
    while i <= b'9' {
        table[i as usize] = 1;
        i += 1;
    }
    table[b'.' as usize] = 1;
    table[b'-' as usize] = 1;
    table[b'_' as usize] = 1;

    let mut i = b'A';
    while i <= b'Z' {
        table[i as usize] = 2;
        i += 1;
    }

    table
};

/// Classify an ASCII byte of a hostname
pub fn classify_host_byte(b: u8) -> HostByte {
    if !b.is_ascii() {
        return HostByte::Invalid;
    }
    match HOSTNAME_CHAR_TABLE[b as usize] {
        1 => HostByte::Valid,
        2 => HostByte::Upper,
        _ => HostByte::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_host_byte() {
        assert_eq!(classify_host_byte(b'a'), HostByte::Valid);
        assert_eq!(classify_host_byte(b'-'), HostByte::Valid);
        assert_eq!(classify_host_byte(b'Q'), HostByte::Upper);
        assert_eq!(classify_host_byte(b'/'), HostByte::Invalid);
        assert_eq!(classify_host_byte(b'@'), HostByte::Invalid);
        assert_eq!(classify_host_byte(0xC3), HostByte::Invalid);
    }

    #[test]
    fn test_param_trim_chars() {
        assert!(is_param_trim_char('\x0B'));
        assert!(is_param_trim_char('\0'));
        assert!(!is_param_trim_char('\u{a0}'));
    }
}
