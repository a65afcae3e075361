//! Locator templates for each stage of the comments chain

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::domain::DomainError;

/// Matches `{name}` placeholders
static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{([^{}]*)\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    /// `in_query` is set once a `?` has appeared in an earlier literal
    Placeholder { name: String, in_query: bool },
}

/// A locator with `{name}` placeholders, checked against the names a stage
/// can supply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorTemplate {
    segments: Vec<Segment>,
}

impl LocatorTemplate {
    pub fn parse(template: &str, allowed: &[&str]) -> Result<Self, DomainError> {
        let mut segments = Vec::new();
        let mut in_query = false;
        let mut last = 0;

        for cap in PLACEHOLDER_PATTERN.captures_iter(template) {
            let Some(name) = cap.get(1) else {
                continue;
            };
            let whole = cap.get_match();

            let literal = &template[last..whole.start()];
            check_literal(literal, template)?;
            if !literal.is_empty() {
                in_query |= literal.contains('?');
                segments.push(Segment::Literal(literal.to_string()));
            }

            if !allowed.contains(&name.as_str()) {
                return Err(DomainError::template(format!(
                    "Unknown placeholder '{{{}}}' in '{}', expected one of {:?}",
                    name.as_str(),
                    template,
                    allowed
                )));
            }

            segments.push(Segment::Placeholder {
                name: name.as_str().to_string(),
                in_query,
            });
            last = whole.end();
        }

        let rest = &template[last..];
        check_literal(rest, template)?;
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Substitute placeholders, percent-encoding each value.
    ///
    /// A name missing from `params` renders empty.
    pub fn render(&self, params: &[(&str, &str)]) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Placeholder { name, in_query } => {
                    let value = params
                        .iter()
                        .find(|(key, _)| *key == name.as_str())
                        .map(|(_, value)| *value)
                        .unwrap_or_default();

                    if *in_query {
                        byte_serialize(value.as_bytes()).collect()
                    } else {
                        encode_path_segment(value)
                    }
                }
            })
            .collect()
    }
}

/// Braces left outside a matched placeholder are unbalanced
fn check_literal(literal: &str, template: &str) -> Result<(), DomainError> {
    if literal.contains('{') || literal.contains('}') {
        return Err(DomainError::template(format!(
            "Unbalanced braces in '{}'",
            template
        )));
    }

    Ok(())
}

/// Encode `value` as a single path segment; `/`, `?`, `#`, `%` and spaces are
/// all escaped
fn encode_path_segment(value: &str) -> String {
    let Ok(mut url) = Url::parse("http://segment.invalid/") else {
        return value.to_string();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(value);
    }

    url.path().trim_start_matches('/').to_string()
}

/// Raw locator templates as they appear in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTemplates {
    /// Placeholders: `{username}`
    pub user: String,
    /// Placeholders: `{user_id}`
    pub blog: String,
    /// Placeholders: `{blog_id}`, `{title}`
    pub post: String,
    /// Placeholders: `{post_id}`
    pub comments: String,
}

impl Default for RouteTemplates {
    fn default() -> Self {
        Self {
            user: "users/{username}".to_string(),
            blog: "users/{user_id}/blog".to_string(),
            post: "blogs/{blog_id}/posts/{title}".to_string(),
            comments: "posts/{post_id}/comments".to_string(),
        }
    }
}

/// Route templates after placeholder validation
#[derive(Debug, Clone)]
pub struct Routes {
    pub user: LocatorTemplate,
    pub blog: LocatorTemplate,
    pub post: LocatorTemplate,
    pub comments: LocatorTemplate,
}

impl TryFrom<&RouteTemplates> for Routes {
    type Error = DomainError;

    fn try_from(templates: &RouteTemplates) -> Result<Self, Self::Error> {
        Ok(Self {
            user: LocatorTemplate::parse(&templates.user, &["username"])?,
            blog: LocatorTemplate::parse(&templates.blog, &["user_id"])?,
            post: LocatorTemplate::parse(&templates.post, &["blog_id", "title"])?,
            comments: LocatorTemplate::parse(&templates.comments, &["post_id"])?,
        })
    }
}
