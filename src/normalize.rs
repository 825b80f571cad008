/// Collapses every run of whitespace (newlines and tabs included) into a
/// single space and trims both ends.
///
/// PDF text runs come out with arbitrary spacing, so every later stage works
/// on this one-line form.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        let raw = "  Week 1\n\tMonday   Breakfast*\r\n Daal  ";
        assert_eq!(collapse_whitespace(raw), "Week 1 Monday Breakfast* Daal");
    }

    #[test]
    fn keeps_case_and_punctuation() {
        assert_eq!(
            collapse_whitespace("Tang/Rooh  Afza +\nSALAD"),
            "Tang/Rooh Afza + SALAD"
        );
    }

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }
}
