//! Per-parse configuration.

use std::collections::{HashMap, HashSet};

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Options for one parse call.
///
/// The only setting is the set of component tag names. An element whose
/// name is registered (case as written) becomes a [`Node::Component`] and
/// its content is discarded.
///
/// ```
/// use quill_html::ParseOptions;
///
/// let options = ParseOptions::new().with_component("my-widget");
/// assert!(options.is_component("my-widget"));
/// assert!(!options.is_component("My-Widget"));
///
/// let options: ParseOptions = ["a", "b"].into_iter().collect();
/// assert!(options.is_component("b"));
/// ```
///
/// Options can also be loaded from JSON. `components` is either a list of
/// names or an object whose keys are the names; the values are ignored.
///
/// [`Node::Component`]: quill_dom::Node::Component
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ParseOptions {
    #[serde(default, deserialize_with = "component_names")]
    components: HashSet<String>,
}

impl ParseOptions {
    /// Options with no registered components.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as a component tag.
    #[must_use]
    pub fn with_component(mut self, name: impl Into<String>) -> Self {
        let _ = self.components.insert(name.into());
        self
    }

    /// Whether `name` is a registered component. Case-sensitive.
    #[must_use]
    pub fn is_component(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    /// The registered component names, in no particular order.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ParseOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ComponentNames {
    List(Vec<String>),
    Map(HashMap<String, IgnoredAny>),
}

fn component_names<'de, D>(deserializer: D) -> Result<HashSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ComponentNames::deserialize(deserializer)? {
        ComponentNames::List(names) => names.into_iter().collect(),
        ComponentNames::Map(names) => names.into_keys().collect(),
    })
}
