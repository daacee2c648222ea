use crate::errors::{Result, TemplateError};

/// An HTML page with `__NAME__` placeholder tokens
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
}

impl Template {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    /// Check that every token occurs exactly once
    pub fn validate<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> std::result::Result<(), TemplateError> {
        for token in tokens {
            match self.html.matches(token).count() {
                0 => return Err(TemplateError::Missing(token.to_string())),
                1 => {}
                count => {
                    return Err(TemplateError::Duplicated {
                        token: token.to_string(),
                        count,
                    })
                }
            }
        }
        Ok(())
    }

    /// Check that no token occurs more than once; absent tokens are fine
    pub fn validate_optional<'a>(
        &self,
        tokens: impl IntoIterator<Item = &'a str>,
    ) -> std::result::Result<(), TemplateError> {
        for token in tokens {
            let count = self.html.matches(token).count();
            if count > 1 {
                return Err(TemplateError::Duplicated {
                    token: token.to_string(),
                    count,
                });
            }
        }
        Ok(())
    }

    /// Replace each token with its value. Every token must occur exactly once.
    pub fn substitute(&self, substitutions: &[(&str, String)]) -> Result<String> {
        self.substitute_with_optional(substitutions, &[])
    }

    /// Replace `required` tokens, which must occur exactly once, and
    /// `optional` tokens, which may be absent but never duplicated.
    ///
    /// All tokens are validated before anything is replaced, so a bad
    /// template never yields a half-rendered page. Replacement is a single
    /// pass over the original text; inserted values are never rescanned.
    pub fn substitute_with_optional(
        &self,
        required: &[(&str, String)],
        optional: &[(&str, String)],
    ) -> Result<String> {
        self.validate(required.iter().map(|(token, _)| *token))?;
        self.validate_optional(optional.iter().map(|(token, _)| *token))?;

        let mut spans: Vec<(usize, &str, &str)> = required
            .iter()
            .chain(optional)
            .filter_map(|(token, value)| {
                self.html.find(token).map(|pos| (pos, *token, value.as_str()))
            })
            .collect();
        spans.sort_by_key(|(pos, _, _)| *pos);

        let extra: usize = spans.iter().map(|(_, _, value)| value.len()).sum();
        let mut html = String::with_capacity(self.html.len() + extra);
        let mut cursor = 0;
        for (pos, token, value) in spans {
            html.push_str(&self.html[cursor..pos]);
            html.push_str(value);
            cursor = pos + token.len();
        }
        html.push_str(&self.html[cursor..]);

        Ok(html)
    }
}

/// Make root-absolute asset references relative so the page works from a sub-path
pub fn relativize_asset_paths(html: &str) -> String {
    html.replace("\"/assets", "\"./assets")
}
