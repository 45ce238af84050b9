//! Fixed option sets offered by the book form

use serde::Serialize;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Languages offered in the book form dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Russian,
    English,
    French,
    German,
    Spanish,
    Italian,
    Chinese,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::Russian,
        Language::English,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Italian,
        Language::Chinese,
        Language::Japanese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Language::Russian => "Russian",
            Language::English => "English",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
        }
    }

    /// Labels in display order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Language::label).collect()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

/// Genres offered in the book form dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genre {
    Novel,
    Detective,
    ScienceFiction,
    Fantasy,
    NonFiction,
    Biography,
    Poetry,
    Drama,
    Adventure,
    Historical,
    Horror,
    Comedy,
    Thriller,
    Mystery,
    PopularScience,
    Reference,
}

impl Genre {
    pub const ALL: [Genre; 16] = [
        Genre::Novel,
        Genre::Detective,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::NonFiction,
        Genre::Biography,
        Genre::Poetry,
        Genre::Drama,
        Genre::Adventure,
        Genre::Historical,
        Genre::Horror,
        Genre::Comedy,
        Genre::Thriller,
        Genre::Mystery,
        Genre::PopularScience,
        Genre::Reference,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Novel => "Novel",
            Genre::Detective => "Detective",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::NonFiction => "Non-fiction",
            Genre::Biography => "Biography",
            Genre::Poetry => "Poetry",
            Genre::Drama => "Drama",
            Genre::Adventure => "Adventure",
            Genre::Historical => "Historical",
            Genre::Horror => "Horror",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
            Genre::Mystery => "Mystery",
            Genre::PopularScience => "Popular Science",
            Genre::Reference => "Reference",
        }
    }

    /// Labels in display order
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Genre::label).collect()
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// SelectList
// ---------------------------------------------------------------------------

/// One entry of a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// Dropdown options with at most one pre-selected entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SelectList {
    pub options: Vec<SelectOption>,
}

impl SelectList {
    /// Build a list from labels, marking `selected` if it matches one of them exactly
    pub fn new(labels: &[&str], selected: Option<&str>) -> Self {
        let options = labels
            .iter()
            .map(|label| SelectOption {
                value: (*label).to_string(),
                selected: selected == Some(*label),
            })
            .collect();
        Self { options }
    }

    pub fn languages(selected: Option<&str>) -> Self {
        Self::new(&Language::labels(), selected)
    }

    pub fn genres(selected: Option<&str>) -> Self {
        Self::new(&Genre::labels(), selected)
    }

    /// Currently selected value, if any
    pub fn selected(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.value.as_str())
    }
}
