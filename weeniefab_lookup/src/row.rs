//! Row splitting for the lookup table export format.

/// Split one line of the lookup export into its fields.
///
/// A `"` toggles quoted mode and is itself dropped; a `,` outside quotes ends a field. Quotes
/// are never escaped by doubling, so `"a""b"` reads as `ab`. An empty line is one empty field.
pub(crate) fn split_row(row: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    for ch in row.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }
    fields.push(field);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_on_commas() {
        assert_eq!(split_row("a,b,,c"), vec!["a", "b", "", "c"]);
        assert_eq!(split_row(""), vec![""]);
        assert_eq!(split_row(","), vec!["", ""]);
    }

    #[test]
    fn quotes_protect_commas_and_are_stripped() {
        assert_eq!(
            split_row(r#""Table 1 - Item Type","1,Melee Weapon",x"#),
            vec!["Table 1 - Item Type", "1,Melee Weapon", "x"]
        );
    }

    #[test]
    fn quotes_toggle_rather_than_escape() {
        assert_eq!(split_row(r#""a""b",c"#), vec!["ab", "c"]);
        assert_eq!(split_row(r#"a"b,c"d,e"#), vec!["ab,cd", "e"]);
    }

    #[test]
    fn unterminated_quote_swallows_rest_of_line() {
        assert_eq!(split_row(r#"a,"b,c"#), vec!["a", "b,c"]);
    }
}
