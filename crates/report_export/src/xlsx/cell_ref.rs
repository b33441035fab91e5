//! A1-style cell references

/// Column letters for a 0-based column index (0 -> "A", 26 -> "AA")
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut col = index + 1;
    while col > 0 {
        col -= 1;
        letters.push(b'A' + (col % 26) as u8);
        col /= 26;
    }
    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Reference for a 0-based column and 1-based row (`C4`)
pub fn cell_ref(column: usize, row: usize) -> String {
    format!("{}{}", column_letters(column), row)
}

/// Range between two cells (`A1:C4`)
pub(crate) fn range_ref(first: (usize, usize), last: (usize, usize)) -> String {
    format!("{}:{}", cell_ref(first.0, first.1), cell_ref(last.0, last.1))
}

/// Absolute range (`$A$1:$C$4`), as used in defined names
pub(crate) fn absolute_range_ref(first: (usize, usize), last: (usize, usize)) -> String {
    format!(
        "${}${}:${}${}",
        column_letters(first.0),
        first.1,
        column_letters(last.0),
        last.1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(51), "AZ");
        assert_eq!(column_letters(52), "BA");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
        assert_eq!(column_letters(16_383), "XFD");
    }

    #[test]
    fn test_refs() {
        assert_eq!(cell_ref(2, 4), "C4");
        assert_eq!(range_ref((0, 1), (2, 3)), "A1:C3");
        assert_eq!(absolute_range_ref((0, 1), (2, 3)), "$A$1:$C$3");
    }
}
