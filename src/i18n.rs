//! User-facing text in the supported languages
//!
//! Every message the front end shows is a [`Message`] key; the text is
//! looked up for the [`Language`] held by the caller's
//! [`Settings`](crate::settings::Settings). There is no ambient language
//! state: whoever renders a message passes the language in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GUI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Gr,
}

impl Language {
    /// Code stored in the settings file
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Gr => "gr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "gr" => Ok(Language::Gr),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// Message keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    // Validation warnings
    MandatoryFieldsWarn,
    NoSpacesInNamesWarn,
    TranslatorValidationWarn,
    YearValidationWarn,
    IsbnValidationWarn,
    ShelfNoNumbersWarn,
    ShelfRowColNotSetWarn,
    NumOfCopiesWarn,
    InvalidTransferFileMsg,

    // Status messages
    BookSavedMsg,
    BookDeletedMsg,
    DeleteConfirmMsg,
    Found,
    SearchCompleteMsg,
    NoBooksFoundMsg,
    NoFileFoundMsg,
    ExportedTo,
    ImportedFrom,
    Welcome,
}

impl Message {
    /// Text for this message in the given language
    pub fn text(&self, language: Language) -> &'static str {
        let (en, gr) = self.pair();
        match language {
            Language::En => en,
            Language::Gr => gr,
        }
    }

    fn pair(&self) -> (&'static str, &'static str) {
        match self {
            Message::MandatoryFieldsWarn => (
                "Fields with asterisk (*) are mandatory",
                "Τα πεδία με αστερίσκο (*) είναι υποχρεωτικά",
            ),
            Message::NoSpacesInNamesWarn => (
                "Use - instead of spaces in names",
                "Χρησιμοποιήστε παύλα αντί για κενό στα ονόματα",
            ),
            Message::TranslatorValidationWarn => (
                "Both First and Last translator names should be set",
                "Ο Μεταφραστής πρέπει να έχει όνομα και επώνυμο",
            ),
            Message::YearValidationWarn => ("Invalid year format", "Λάθος Έτος Έκδοσης"),
            Message::IsbnValidationWarn => (
                "Invalid ISBN format - Must be 10 or 13 digit long",
                "Το ISBN πρέπει να αποτελείται από 10 ή 13 ψηφία",
            ),
            Message::ShelfNoNumbersWarn => (
                "Both Shelf column and row must be numbers",
                "Και η γραμμή και η στήλη πρέπει να είναι αριθμοί",
            ),
            Message::ShelfRowColNotSetWarn => (
                "Both Shelf column and row must be set",
                "Το ράφι πρέπει να αποτελείται απο γραμμή ΚΑΙ στήλη",
            ),
            Message::NumOfCopiesWarn => (
                "Number of copies must be a number greater than 1",
                "Ο αριθμός αντιτύπων πρέπει να είναι μεγαλύτερος ίσος του 1",
            ),
            Message::InvalidTransferFileMsg => (
                "Excel file not created by Bookcase Manager",
                "Το αρχείο δεν έχει δημιουργηθεί από το πρόγραμμα",
            ),
            Message::BookSavedMsg => ("Book Saved", "Το βιβλίο αποθηκεύτηκε"),
            Message::BookDeletedMsg => ("Book Deleted", "Το βιβλίο διαγράφηκε"),
            Message::DeleteConfirmMsg => (
                "Are you sure you want to delete: ",
                "Είστε σίγουροι ότι θέλετε να διαγράψετε το βιβλίο: ",
            ),
            Message::Found => ("Found", "Βρέθηκαν"),
            Message::SearchCompleteMsg => ("books", "βιβλία"),
            Message::NoBooksFoundMsg => (
                "No books found matching the search criteria",
                "Δε βρέθηκαν βιβλία που να ταιριάζουν στα κριτήρια αναζήτησης",
            ),
            Message::NoFileFoundMsg => ("No matching files found under ", "Δε βρέθηκαν αρχεία στο "),
            Message::ExportedTo => ("Successfully Exported to ", "Επιτυχής εξαγωγή στο "),
            Message::ImportedFrom => ("Successfully Imported from ", "Επιτυχής Εισαγωγή από "),
            Message::Welcome => ("Welcome", "Καλώς ήρθατε!"),
        }
    }
}
