//! `;`-delimited parameter lists
//!
//! Headers like `Via`, `From` and `Contact` end in a parameter tail of the
//! form `;name=value;flag;other="quoted value"`. The enumerator walks that
//! tail lazily over the original text. An invalid pair is discarded and
//! scanning resumes at the next `;`; one bad parameter never poisons the
//! rest of the list.

use crate::chars;

/// A single `(name, value)` parameter
///
/// Flag parameters (no `=`) carry an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> Parameter<'a> {
    /// Parameter name, trimmed
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Parameter value, trimmed; quoted values keep their quotes
    pub fn value(&self) -> &'a str {
        self.value
    }

    /// True for a name-only parameter such as `;rport`
    pub fn is_flag(&self) -> bool {
        self.value.is_empty()
    }
}

/// View over a raw parameter tail (text starting at the first `;`)
#[derive(Debug, Clone, Copy)]
pub struct Parameters<'a> {
    params: &'a str,
}

impl<'a> Parameters<'a> {
    /// Create a view over a parameter tail
    pub fn new(params: &'a str) -> Self {
        Parameters { params }
    }

    /// Iterate over the valid parameters
    pub fn iter(&self) -> ParameterIter<'a> {
        ParameterIter {
            remaining: self.params,
        }
    }

    /// The raw text this view covers
    pub fn as_str(&self) -> &'a str {
        self.params
    }
}

impl<'a> IntoIterator for Parameters<'a> {
    type Item = Parameter<'a>;
    type IntoIter = ParameterIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Parameters<'a> {
    type Item = Parameter<'a>;
    type IntoIter = ParameterIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Forward-only cursor over a parameter tail
#[derive(Debug, Clone, Copy)]
pub struct ParameterIter<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for ParameterIter<'a> {
    type Item = Parameter<'a>;

    fn next(&mut self) -> Option<Parameter<'a>> {
        loop {
            let (name, value, is_flag) = self.slice_parameter()?;
            let name = name.trim();
            let value = value.trim();

            if !is_valid_name(name) {
                continue;
            }
            if !is_flag && !is_valid_value(value) {
                continue;
            }

            return Some(Parameter {
                name,
                value: if is_flag { "" } else { value },
            });
        }
    }
}

impl<'a> ParameterIter<'a> {
    /// Cut the next `;name[=value]` chunk off the remaining text, without
    /// validating it. Returns `None` once the text no longer starts with a
    /// parameter separator.
    fn slice_parameter(&mut self) -> Option<(&'a str, &'a str, bool)> {
        if self.remaining.is_empty() {
            return None;
        }
        self.remaining = self.remaining.strip_prefix(';')?;

        let name_end = self
            .remaining
            .find([';', '='])
            .unwrap_or(self.remaining.len());
        let name = &self.remaining[..name_end];
        self.remaining = &self.remaining[name_end..];

        match self.remaining.strip_prefix('=') {
            Some(rest) => {
                self.remaining = rest;
                let value = self.slice_value();
                Some((name, value, false))
            }
            None => Some((name, "", true)),
        }
    }

    /// Cut the value part: if it opens with a quoted string, the scan for
    /// the terminating `;` starts after the closing quote, so quoted values
    /// may contain `;` freely.
    fn slice_value(&mut self) -> &'a str {
        let skip = match quoted_span(self.remaining) {
            Some((start, len)) => start + len,
            None => 0,
        };
        let end = self.remaining[skip..]
            .find(';')
            .map(|i| skip + i)
            .unwrap_or(self.remaining.len());

        let value = &self.remaining[..end];
        self.remaining = &self.remaining[end..];
        value
    }
}

/// Locate a leading quoted string: `(start, distance to closing quote)`
fn quoted_span(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let start = chars::index_of_non_whitespace(bytes, 0)?;
    if bytes[start] != b'"' {
        return None;
    }
    let end = chars::index_of_non_escaped(bytes, b'"', start + 1)?;
    Some((start, end - start))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && chars::is_token(name.as_bytes())
}

fn is_valid_value(value: &str) -> bool {
    !value.is_empty()
        && (chars::is_quoted(value.as_bytes()) || chars::is_token(value.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(data: &str) -> Vec<(String, String)> {
        Parameters::new(data)
            .iter()
            .map(|p| (p.name().to_string(), p.value().to_string()))
            .collect()
    }

    #[test]
    fn test_full_parameter_list() {
        let params = collect(
            ";^te%st1=|valu~e1;  test2 =  value2   ;test3   =\"значение(3)\";test4 ;test5=value5    ",
        );
        assert_eq!(
            params,
            [
                ("^te%st1".to_string(), "|valu~e1".to_string()),
                ("test2".to_string(), "value2".to_string()),
                ("test3".to_string(), "\"значение(3)\"".to_string()),
                ("test4".to_string(), "".to_string()),
                ("test5".to_string(), "value5".to_string()),
            ]
        );
    }

    #[test]
    fn test_flag_parameters() {
        let params = collect(";key1;key2;key3");
        assert_eq!(
            params,
            [
                ("key1".to_string(), "".to_string()),
                ("key2".to_string(), "".to_string()),
                ("key3".to_string(), "".to_string()),
            ]
        );
        assert!(Parameters::new(";rport").iter().next().unwrap().is_flag());
    }

    #[test]
    fn test_text_without_leading_separator_yields_nothing() {
        assert!(collect("key=value").is_empty());
    }

    #[test]
    fn test_invalid_names_are_skipped() {
        assert!(collect(";k\"e\"y").is_empty());
        assert_eq!(
            collect(";k[e]y1=value1;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        assert_eq!(
            collect(";key1=;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
        assert_eq!(
            collect(";key1=value1;key2=va(l)ue2"),
            [("key1".to_string(), "value1".to_string())]
        );
        assert_eq!(
            collect(";key1=va   lue1;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
    }

    #[test]
    fn test_broken_quoting_is_skipped() {
        assert_eq!(
            collect(";key1=\"value1;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
        assert_eq!(
            collect(";key1=asdf\"value1\";key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
        assert_eq!(
            collect(";key1=asdf\"value1\"qwer;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
        assert_eq!(
            collect(";key1=\"value1\"qwer;key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
        assert_eq!(
            collect(";key1=\"va\"lue1\";key2=value2"),
            [("key2".to_string(), "value2".to_string())]
        );
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(
            collect(";key1=\"va\\\"lue1\""),
            [("key1".to_string(), "\"va\\\"lue1\"".to_string())]
        );
        assert_eq!(
            collect(";key1=\"v a l u e 1\""),
            [("key1".to_string(), "\"v a l u e 1\"".to_string())]
        );
        assert_eq!(
            collect(";key1=\"value1;value2\""),
            [("key1".to_string(), "\"value1;value2\"".to_string())]
        );
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(
            collect(";key1=   value1  ;"),
            [("key1".to_string(), "value1".to_string())]
        );
    }
}
