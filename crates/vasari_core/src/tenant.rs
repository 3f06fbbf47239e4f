//! Tenant and location records read from the directory.

use serde::{Deserialize, Serialize};

/// Display fields for one tenant, as read from the tenant directory.
///
/// Optional fields may be absent for partially onboarded tenants; token
/// interpolation substitutes an empty string for them rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tenant {
    /// Stable tenant identifier
    pub id: String,
    /// Display name substituted for `{client_name}`
    pub name: String,
    /// Street address
    pub address: Option<String>,
    /// City substituted for `{client_city}`
    pub city: Option<String>,
    /// State or region substituted for `{client_state}`
    pub state: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Canonical site domain, e.g. `https://acme.example.com`
    pub canonical_url: String,
}

/// A sub-location of a tenant with its own content grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Stable location identifier
    pub id: String,
    /// Owning tenant
    pub tenant_id: String,
    /// Location city, used in place of the tenant city when present
    pub city: Option<String>,
    /// Location state, used in place of the tenant state when present
    pub state: Option<String>,
}

impl Tenant {
    /// The tenant with location fields overridden by `location`, when one
    /// is in play for the run.
    ///
    /// Location city/state take precedence over the tenant's own so that
    /// interpolated content names the place the page is for.
    pub fn scoped_to(&self, location: Option<&Location>) -> Tenant {
        let mut scoped = self.clone();
        if let Some(location) = location {
            if location.city.is_some() {
                scoped.city = location.city.clone();
            }
            if location.state.is_some() {
                scoped.state = location.state.clone();
            }
        }
        scoped
    }
}
