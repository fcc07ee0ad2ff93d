//! User records as returned by the remote endpoint.
//!
//! Field names follow the JSON payload (`zipcode`, `catchPhrase`, `bs`).
//! Records are never modified after decoding; the only mutation the
//! application performs is dropping a whole record from its local list.
use serde::Deserialize;

pub type UserId = u64;

const MAP_BASE_URL: &str = "https://www.google.com/maps?q=";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub address: Address,
    pub company: Company,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinate pair, kept verbatim as the API sends it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(rename = "catchPhrase")]
    pub catch_phrase: String,
    pub bs: String,
}

impl User {
    /// Short address used in the table: `"street, city"`.
    pub fn address_summary(&self) -> String {
        format!("{}, {}", self.address.street, self.address.city)
    }
}

impl Geo {
    /// External map link for this coordinate pair.
    pub fn map_url(&self) -> String {
        format!("{MAP_BASE_URL}{},{}", self.lat.trim(), self.lng.trim())
    }
}

/// Decode a JSON array of users.
pub fn parse_users(body: &[u8]) -> Result<Vec<User>, serde_json::Error> {
    serde_json::from_slice(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_USER: &str = r#"[{
        "id": 1,
        "name": "Leanne Graham",
        "username": "Bret",
        "email": "Sincere@april.biz",
        "address": {
            "street": "Kulas Light",
            "suite": "Apt. 556",
            "city": "Gwenborough",
            "zipcode": "92998-3874",
            "geo": { "lat": "-37.3159", "lng": "81.1496" }
        },
        "phone": "1-770-736-8031 x56442",
        "website": "hildegard.org",
        "company": {
            "name": "Romaguera-Crona",
            "catchPhrase": "Multi-layered client-server neural-net",
            "bs": "harness real-time e-markets"
        }
    }]"#;

    #[test]
    fn parses_payload_shape() {
        let users = parse_users(ONE_USER.as_bytes()).unwrap();
        assert_eq!(users.len(), 1);
        let u = &users[0];
        assert_eq!(u.id, 1);
        assert_eq!(u.username, "Bret");
        assert_eq!(u.address.zipcode, "92998-3874");
        assert_eq!(u.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(u.address_summary(), "Kulas Light, Gwenborough");
    }

    #[test]
    fn map_url_joins_lat_and_lng() {
        let users = parse_users(ONE_USER.as_bytes()).unwrap();
        assert_eq!(
            users[0].address.geo.map_url(),
            "https://www.google.com/maps?q=-37.3159,81.1496"
        );
    }

    #[test]
    fn missing_username_defaults_to_empty() {
        let body = ONE_USER.replace(r#""username": "Bret","#, "");
        let users = parse_users(body.as_bytes()).unwrap();
        assert!(users[0].username.is_empty());
    }

    #[test]
    fn non_array_body_is_rejected() {
        assert!(parse_users(br#"{"id": 1}"#).is_err());
        assert!(parse_users(b"<html>").is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        assert!(parse_users(b"[]").unwrap().is_empty());
    }
}
