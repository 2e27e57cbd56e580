// Placeholder substitution for HTML/JS templates

/// Replace `${name}` placeholders in a template.
///
/// Substitution is a single pass: inserted values are never rescanned, and
/// placeholders with no matching variable are left as-is.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match vars.iter().find(|(key, _)| *key == name) {
                    Some((_, value)) => result.push_str(value),
                    None => result.push_str(&rest[start..start + 2 + end + 1]),
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template() {
        let result = fill_template(
            "document.getElementById('${id}-time'); setInterval(${fn}, ${ms});",
            &[("id", "c1"), ("fn", "updateClock_c1"), ("ms", "1000")],
        );
        assert_eq!(
            result,
            "document.getElementById('c1-time'); setInterval(updateClock_c1, 1000);"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let result = fill_template("${a}|${b}", &[("a", "${b}"), ("b", "x")]);
        assert_eq!(result, "${b}|x");
    }

    #[test]
    fn test_unknown_and_unterminated_placeholders() {
        assert_eq!(fill_template("${missing} ok", &[]), "${missing} ok");
        assert_eq!(fill_template("tail ${open", &[("open", "x")]), "tail ${open");
        assert_eq!(fill_template("no placeholders", &[]), "no placeholders");
    }
}
