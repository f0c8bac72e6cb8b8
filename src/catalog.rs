use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::EnumIter;

/// Service categories offered by the salon.
///
/// The wire format is the lowercase variant name. The booking site has
/// always presented the `massage` category under the label "Braids",
/// so `label()` and the serialized name intentionally differ there.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Hair,
    Dreadlocks,
    Nails,
    Facial,
    Massage,
    Makeup,
    Barber,
    Other,
}

impl ServiceCategory {
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "hair" => ServiceCategory::Hair,
            "dreadlocks" => ServiceCategory::Dreadlocks,
            "nails" => ServiceCategory::Nails,
            "facial" => ServiceCategory::Facial,
            "massage" => ServiceCategory::Massage,
            "makeup" => ServiceCategory::Makeup,
            "barber" => ServiceCategory::Barber,
            _ => ServiceCategory::Other,
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            ServiceCategory::Hair => "hair",
            ServiceCategory::Dreadlocks => "dreadlocks",
            ServiceCategory::Nails => "nails",
            ServiceCategory::Facial => "facial",
            ServiceCategory::Massage => "massage",
            ServiceCategory::Makeup => "makeup",
            ServiceCategory::Barber => "barber",
            ServiceCategory::Other => "other",
        }
    }

    /// Display label for combo boxes and list badges.
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Hair => "Hair",
            ServiceCategory::Dreadlocks => "Dreadlocks",
            ServiceCategory::Nails => "Nails",
            ServiceCategory::Facial => "Facial",
            ServiceCategory::Massage => "Braids",
            ServiceCategory::Makeup => "Makeup",
            ServiceCategory::Barber => "Barber",
            ServiceCategory::Other => "Other",
        }
    }
}

impl<'de> Deserialize<'de> for ServiceCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Unknown categories fall back to Other instead of failing the
        // whole list fetch.
        let raw = String::deserialize(deserializer)?;
        Ok(ServiceCategory::from_wire(raw.trim()))
    }
}

/// A catalog entry as returned by the backend. The backend owns these;
/// locally they are only ever replaced wholesale after a fetch.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub price: f64,
    pub duration: u32,
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default, deserialize_with = "deserialize_discount")]
    pub discount: Option<u32>,
}

pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsWire {
    List(Vec<String>),
    Joined(String),
}

/// The backend is inconsistent about tags: older records carry one
/// comma-joined string, newer ones a proper list. Normalize here so the
/// rest of the app only ever sees a list.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<TagsWire>::deserialize(deserializer)?;
    Ok(match wire {
        None => Vec::new(),
        Some(TagsWire::List(tags)) => tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect(),
        Some(TagsWire::Joined(joined)) => split_tags(&joined),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DiscountWire {
    Number(u32),
    Text(String),
}

/// Discounts arrive as a number, a numeric string, or an empty string.
/// A missing, unparseable, or zero discount all mean "no discount".
fn deserialize_discount<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let wire = Option::<DiscountWire>::deserialize(deserializer)?;
    let discount = match wire {
        None => None,
        Some(DiscountWire::Number(n)) => Some(n),
        Some(DiscountWire::Text(raw)) => raw.trim().parse::<u32>().ok(),
    };
    Ok(discount.filter(|d| *d > 0))
}
