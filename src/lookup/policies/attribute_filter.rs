use crate::lookup::domain::Attribute;

/// AttributeFilter - decides which attributes are shown to the user
///
/// MISP's own value search is fuzzy and returns whole events, so a matched
/// event usually carries unrelated attributes. Only attributes of an allowed
/// type whose value equals the queried indicator exactly are displayed.
pub struct AttributeFilter;

impl AttributeFilter {
    /// Returns true if the attribute should be rendered
    ///
    /// # Arguments
    /// * `attribute` - Attribute from the search result
    /// * `queried_value` - Indicator as typed by the user (compared byte for byte)
    /// * `allowed_types` - MISP type tags the command searches for
    pub fn matches(attribute: &Attribute, queried_value: &str, allowed_types: &[&str]) -> bool {
        if !allowed_types.contains(&attribute.attribute_type()) {
            return false;
        }

        attribute.value() == queried_value
    }
}
