/// Static catalog mapping genre names to the catalog provider's integer ids.
/// The selection surface and the recommendation engine both look entries up
/// here; the table itself is never mutated.
pub const GENRE_CATALOG: [(&str, u16); 10] = [
    ("Action", 28),
    ("Comedy", 35),
    ("Drama", 18),
    ("Fantasy", 14),
    ("Horror", 27),
    ("Mystery", 9648),
    ("Romance", 10749),
    ("Science Fiction", 878),
    ("Thriller", 53),
    ("Western", 37),
];

pub fn genre_id(name: &str) -> Option<u16> {
    GENRE_CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
}

pub fn genre_name(id: u16) -> Option<&'static str> {
    GENRE_CATALOG
        .iter()
        .find(|(_, i)| *i == id)
        .map(|(n, _)| *n)
}

pub fn genre_names() -> impl Iterator<Item = &'static str> {
    GENRE_CATALOG.iter().map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_entries() {
        assert_eq!(GENRE_CATALOG.len(), 10);
    }

    #[test]
    fn test_genre_id_lookup() {
        assert_eq!(genre_id("Horror"), Some(27));
        assert_eq!(genre_id("Comedy"), Some(35));
        assert_eq!(genre_id("Science Fiction"), Some(878));
        assert_eq!(genre_id("Documentary"), None);
    }

    #[test]
    fn test_genre_name_lookup() {
        assert_eq!(genre_name(9648), Some("Mystery"));
        assert_eq!(genre_name(37), Some("Western"));
        assert_eq!(genre_name(1), None);
    }

    #[test]
    fn test_mapping_is_bidirectional() {
        for name in genre_names() {
            let id = genre_id(name).unwrap();
            assert_eq!(genre_name(id), Some(name));
        }
    }
}
