//! Tenant token interpolation.
//!
//! Template strings carry a fixed token set (`{client_name}`,
//! `{client_city}`, `{client_state}`) substituted per tenant before
//! generation. The same interpolated values are persisted with the
//! finished article, so what the generator saw is byte-identical to what
//! readers are shown.

use crate::Tenant;
use regex::Regex;
use std::sync::LazyLock;

/// Token replaced by the tenant display name.
pub const TOKEN_NAME: &str = "{client_name}";
/// Token replaced by the tenant (or location) city.
pub const TOKEN_CITY: &str = "{client_city}";
/// Token replaced by the tenant (or location) state.
pub const TOKEN_STATE: &str = "{client_state}";

static DOUBLED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("doubled-space pattern"));

/// Substitute the tenant token set into one template string.
///
/// Missing tenant fields substitute as an empty string; this never fails.
/// Runs of two or more spaces left behind by an empty substitution
/// collapse to a single space. Nothing else is normalized: punctuation
/// adjacent to an empty token (a trailing comma, a single trailing
/// space) survives as-is.
///
/// # Examples
///
/// ```
/// use vasari_core::{Tenant, interpolate};
///
/// let tenant = Tenant {
///     name: "Acme".into(),
///     city: Some("Plano".into()),
///     state: Some("TX".into()),
///     ..Tenant::default()
/// };
/// assert_eq!(
///     interpolate("{client_name} Insurance in {client_city}, {client_state}", &tenant),
///     "Acme Insurance in Plano, TX"
/// );
/// ```
pub fn interpolate(template: &str, tenant: &Tenant) -> String {
    let filled = template
        .replace(TOKEN_NAME, &tenant.name)
        .replace(TOKEN_CITY, tenant.city.as_deref().unwrap_or(""))
        .replace(TOKEN_STATE, tenant.state.as_deref().unwrap_or(""));
    DOUBLED_SPACES.replace_all(&filled, " ").into_owned()
}

/// Interpolate every string in a list, preserving order.
pub fn interpolate_all(templates: &[String], tenant: &Tenant) -> Vec<String> {
    templates
        .iter()
        .map(|template| interpolate(template, tenant))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Tenant {
        Tenant {
            id: "acme-id".into(),
            name: "Acme".into(),
            city: Some("Plano".into()),
            state: Some("TX".into()),
            ..Tenant::default()
        }
    }

    #[test]
    fn substitutes_all_tokens() {
        let out = interpolate(
            "{client_name} Insurance in {client_city}, {client_state}",
            &acme(),
        );
        assert_eq!(out, "Acme Insurance in Plano, TX");
    }

    #[test]
    fn missing_field_becomes_empty_without_trimming_punctuation() {
        let mut tenant = acme();
        tenant.state = None;
        let out = interpolate(
            "{client_name} Insurance in {client_city}, {client_state}",
            &tenant,
        );
        // The trailing comma-space survives; only doubled spaces collapse.
        assert_eq!(out, "Acme Insurance in Plano, ");
    }

    #[test]
    fn collapses_doubled_spaces_only() {
        let mut tenant = acme();
        tenant.city = None;
        let out = interpolate("Serving {client_city} {client_state} proudly", &tenant);
        assert_eq!(out, "Serving TX proudly");
    }

    #[test]
    fn interpolates_link_lists_in_order() {
        let links = vec![
            "Contact {client_name}".to_string(),
            "{client_city} service areas".to_string(),
        ];
        let out = interpolate_all(&links, &acme());
        assert_eq!(out, vec!["Contact Acme", "Plano service areas"]);
    }
}
