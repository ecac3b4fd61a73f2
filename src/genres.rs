/// Genre ids known to the catalogue and their display titles
pub const GENRES: [(u32, &str); 9] = [
    (1, "Personal Growth"),
    (2, "Investigative Journalism"),
    (3, "History"),
    (4, "Comedy"),
    (5, "Entertainment"),
    (6, "Business"),
    (7, "Fiction"),
    (8, "News"),
    (9, "Kids and Family"),
];

/// Display title for a genre id, falling back to a generic "Genre N"
pub fn genre_label(id: u32) -> String {
    GENRES
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, title)| (*title).to_string())
        .unwrap_or_else(|| format!("Genre {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_ids_map_to_titles() {
        assert_eq!(genre_label(1), "Personal Growth");
        assert_eq!(genre_label(9), "Kids and Family");
    }

    #[test]
    fn unknown_ids_fall_back() {
        assert_eq!(genre_label(0), "Genre 0");
        assert_eq!(genre_label(42), "Genre 42");
    }
}
