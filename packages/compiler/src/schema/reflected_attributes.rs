//! Reflected Attribute Registry
//!
//! Which DOM properties reflect to which HTML attributes. A property binding
//! such as `.value=${x}` can only be rendered on the server when the property
//! has an attribute counterpart; boolean-valued attributes are rendered by
//! presence rather than by value.
//!
//! The table is pure data: adding a row is the only change needed to support
//! another property.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Tag name under which entries apply to every element.
pub const ANY_ELEMENT: &str = "*";

/// `(tag, property, attribute, is_boolean)`
const REFLECTED_PROPERTIES: &[(&str, &str, &str, bool)] = &[
    // Global attributes
    ("*", "accessKey", "accesskey", false),
    ("*", "className", "class", false),
    ("*", "dir", "dir", false),
    ("*", "draggable", "draggable", false),
    ("*", "hidden", "hidden", true),
    ("*", "id", "id", false),
    ("*", "inert", "inert", true),
    ("*", "lang", "lang", false),
    ("*", "slot", "slot", false),
    ("*", "tabIndex", "tabindex", false),
    ("*", "title", "title", false),
    ("*", "role", "role", false),
    ("*", "ariaAtomic", "aria-atomic", false),
    ("*", "ariaBusy", "aria-busy", false),
    ("*", "ariaChecked", "aria-checked", false),
    ("*", "ariaCurrent", "aria-current", false),
    ("*", "ariaDescription", "aria-description", false),
    ("*", "ariaDisabled", "aria-disabled", false),
    ("*", "ariaExpanded", "aria-expanded", false),
    ("*", "ariaHasPopup", "aria-haspopup", false),
    ("*", "ariaHidden", "aria-hidden", false),
    ("*", "ariaInvalid", "aria-invalid", false),
    ("*", "ariaLabel", "aria-label", false),
    ("*", "ariaLevel", "aria-level", false),
    ("*", "ariaLive", "aria-live", false),
    ("*", "ariaModal", "aria-modal", false),
    ("*", "ariaPressed", "aria-pressed", false),
    ("*", "ariaSelected", "aria-selected", false),
    ("*", "ariaValueMax", "aria-valuemax", false),
    ("*", "ariaValueMin", "aria-valuemin", false),
    ("*", "ariaValueNow", "aria-valuenow", false),
    ("*", "ariaValueText", "aria-valuetext", false),
    // Links and media
    ("a", "href", "href", false),
    ("a", "target", "target", false),
    ("a", "rel", "rel", false),
    ("a", "download", "download", false),
    ("img", "src", "src", false),
    ("img", "alt", "alt", false),
    ("img", "width", "width", false),
    ("img", "height", "height", false),
    ("iframe", "src", "src", false),
    ("audio", "src", "src", false),
    ("audio", "controls", "controls", true),
    ("audio", "loop", "loop", true),
    ("video", "src", "src", false),
    ("video", "controls", "controls", true),
    ("video", "loop", "loop", true),
    ("video", "poster", "poster", false),
    // Forms
    ("form", "action", "action", false),
    ("form", "method", "method", false),
    ("label", "htmlFor", "for", false),
    ("output", "htmlFor", "for", false),
    ("input", "value", "value", false),
    ("input", "checked", "checked", true),
    ("input", "disabled", "disabled", true),
    ("input", "multiple", "multiple", true),
    ("input", "name", "name", false),
    ("input", "placeholder", "placeholder", false),
    ("input", "readOnly", "readonly", true),
    ("input", "required", "required", true),
    ("input", "type", "type", false),
    ("input", "min", "min", false),
    ("input", "max", "max", false),
    ("input", "step", "step", false),
    ("button", "disabled", "disabled", true),
    ("button", "name", "name", false),
    ("button", "type", "type", false),
    ("button", "value", "value", false),
    ("select", "disabled", "disabled", true),
    ("select", "multiple", "multiple", true),
    ("select", "name", "name", false),
    ("select", "required", "required", true),
    ("textarea", "disabled", "disabled", true),
    ("textarea", "name", "name", false),
    ("textarea", "placeholder", "placeholder", false),
    ("textarea", "readOnly", "readonly", true),
    ("textarea", "required", "required", true),
    ("option", "disabled", "disabled", true),
    ("option", "label", "label", false),
    ("option", "value", "value", false),
    ("fieldset", "disabled", "disabled", true),
    // Interactive elements
    ("details", "open", "open", true),
    ("dialog", "open", "open", true),
];

/// Attribute a property reflects to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectedAttribute {
    pub attribute_name: &'static str,
    pub is_boolean: bool,
}

type AttributeTable = HashMap<&'static str, HashMap<&'static str, ReflectedAttribute>>;

static REFLECTED_ATTRIBUTES: Lazy<AttributeTable> = Lazy::new(|| {
    let mut table: AttributeTable = HashMap::new();
    for &(tag, property, attribute_name, is_boolean) in REFLECTED_PROPERTIES {
        table.entry(tag).or_default().insert(
            property,
            ReflectedAttribute {
                attribute_name,
                is_boolean,
            },
        );
    }
    table
});

fn lookup_in(tag: &str, property_name: &str) -> Option<ReflectedAttribute> {
    REFLECTED_ATTRIBUTES
        .get(tag)
        .and_then(|properties| properties.get(property_name))
        .copied()
}

/// Looks up the attribute `property_name` reflects to on `tag_name` elements.
///
/// A tag-specific entry wins over the [`ANY_ELEMENT`] entry for the same
/// property; `None` means the property is not reflected at all.
pub fn get_reflected_attribute(property_name: &str, tag_name: &str) -> Option<ReflectedAttribute> {
    let tag = tag_name.to_ascii_lowercase();
    lookup_in(&tag, property_name).or_else(|| lookup_in(ANY_ELEMENT, property_name))
}
