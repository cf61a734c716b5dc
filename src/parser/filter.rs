//! Prop filters: a static skip list or a caller-supplied predicate.

use crate::model::{Component, PropItem};
use std::fmt;

/// Skip rules that need no code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPropFilter {
    pub skip_props_with_name: Vec<String>,
    pub skip_props_without_doc: bool,
}

pub type PropPredicate = dyn Fn(&PropItem, &Component) -> bool;

pub enum PropFilter {
    Static(StaticPropFilter),
    Custom(Box<PropPredicate>),
}

impl PropFilter {
    pub fn custom(predicate: impl Fn(&PropItem, &Component) -> bool + 'static) -> Self {
        PropFilter::Custom(Box::new(predicate))
    }

    /// `true` keeps the prop.
    pub fn allows(&self, prop: &PropItem, component: &Component) -> bool {
        match self {
            PropFilter::Custom(predicate) => predicate(prop, component),
            PropFilter::Static(rules) => {
                if rules.skip_props_without_doc && prop.description.is_empty() {
                    return false;
                }
                !rules.skip_props_with_name.iter().any(|name| *name == prop.name)
            }
        }
    }
}

impl fmt::Debug for PropFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropFilter::Static(rules) => f.debug_tuple("Static").field(rules).finish(),
            PropFilter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropItemType, TagMap};

    fn prop(name: &str, description: &str) -> PropItem {
        PropItem {
            name: name.into(),
            required: true,
            ty: PropItemType::named("string"),
            description: description.into(),
            default_value: None,
            tags: TagMap::new(),
        }
    }

    fn component() -> Component {
        Component {
            name: "Button".into(),
        }
    }

    #[test]
    fn skips_by_name() {
        let filter = PropFilter::Static(StaticPropFilter {
            skip_props_with_name: vec!["children".into(), "ref".into()],
            skip_props_without_doc: false,
        });
        assert!(!filter.allows(&prop("children", "x"), &component()));
        assert!(filter.allows(&prop("color", ""), &component()));
    }

    #[test]
    fn skips_undocumented() {
        let filter = PropFilter::Static(StaticPropFilter {
            skip_props_without_doc: true,
            ..Default::default()
        });
        assert!(!filter.allows(&prop("color", ""), &component()));
        assert!(filter.allows(&prop("color", "Button color."), &component()));
    }

    #[test]
    fn custom_predicate_sees_component() {
        let filter = PropFilter::custom(|prop, component| component.name == "Button" && prop.required);
        assert!(filter.allows(&prop("color", ""), &component()));
        assert!(!filter.allows(
            &prop("color", ""),
            &Component {
                name: "Other".into()
            }
        ));
    }
}
