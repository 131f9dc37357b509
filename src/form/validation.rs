//! Field validation for the book entry form
//!
//! [`BookForm::validate`] runs every check and stops at the first failure.
//! The mandatory-field check always runs first; the remaining checks are
//! independent of each other. Validation has no side effects.

use super::BookForm;
use crate::error::ValidationError;

type Check = std::result::Result<(), ValidationError>;

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn has_whitespace(value: &str) -> bool {
    value.chars().any(char::is_whitespace)
}

impl BookForm {
    /// Run all checks, returning the first failure
    pub fn validate(&self) -> Check {
        self.mandatory_fields_set()?;
        self.names_have_no_spaces()?;
        self.translator_is_valid()?;
        self.year_is_valid()?;
        self.isbn_is_valid()?;
        self.shelf_is_valid()?;
        self.copies_is_valid()?;
        Ok(())
    }

    /// Title and both author names must be set
    pub fn mandatory_fields_set(&self) -> Check {
        if self.title.is_empty() || self.author_last.is_empty() || self.author_first.is_empty() {
            return Err(ValidationError::MandatoryFields);
        }
        Ok(())
    }

    /// Names are stored as `"LAST FIRST"`, so the parts may not contain spaces
    pub fn names_have_no_spaces(&self) -> Check {
        let fields = [
            &self.author_first,
            &self.author_last,
            &self.trans_last,
            &self.trans_first,
            &self.publisher,
        ];
        if fields.iter().any(|field| has_whitespace(field)) {
            return Err(ValidationError::SpacesInNames);
        }
        Ok(())
    }

    /// Translator names are both set or both empty
    pub fn translator_is_valid(&self) -> Check {
        if self.trans_first.is_empty() != self.trans_last.is_empty() {
            return Err(ValidationError::TranslatorIncomplete);
        }
        Ok(())
    }

    pub fn year_is_valid(&self) -> Check {
        if self.pub_year.is_empty() {
            return Ok(());
        }
        if self.pub_year.chars().count() > 4 || !is_digits(&self.pub_year) {
            return Err(ValidationError::InvalidYear);
        }
        Ok(())
    }

    pub fn isbn_is_valid(&self) -> Check {
        if self.isbn.is_empty() {
            return Ok(());
        }
        if !matches!(self.isbn.len(), 10 | 13) || !is_digits(&self.isbn) {
            return Err(ValidationError::InvalidIsbn);
        }
        Ok(())
    }

    /// Row and column are both empty, or both numbers
    pub fn shelf_is_valid(&self) -> Check {
        match (self.shelf_row.is_empty(), self.shelf_col.is_empty()) {
            (true, true) => Ok(()),
            (false, false) => {
                if is_digits(&self.shelf_row) && is_digits(&self.shelf_col) {
                    Ok(())
                } else {
                    Err(ValidationError::ShelfNotNumeric)
                }
            }
            _ => Err(ValidationError::ShelfIncomplete),
        }
    }

    pub fn copies_is_valid(&self) -> Check {
        if !is_digits(&self.num_of_copies) {
            return Err(ValidationError::InvalidCopies);
        }
        match self.num_of_copies.parse::<i32>() {
            Ok(copies) if copies >= 1 => Ok(()),
            _ => Err(ValidationError::InvalidCopies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> BookForm {
        BookForm {
            title: "title".to_string(),
            author_last: "author_last".to_string(),
            author_first: "author_first".to_string(),
            trans_last: "trans_last".to_string(),
            trans_first: "trans_first".to_string(),
            publisher: "publisher".to_string(),
            pub_year: "1111".to_string(),
            isbn: "0123456789".to_string(),
            num_of_copies: "3".to_string(),
            shelf_row: "1".to_string(),
            shelf_col: "2".to_string(),
        }
    }

    #[test]
    fn test_filled_form_is_valid() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn test_mandatory_fields() {
        let clears: [fn(&mut BookForm); 3] = [
            |f| f.title.clear(),
            |f| f.author_first.clear(),
            |f| f.author_last.clear(),
        ];
        for clear in clears {
            let mut form = filled();
            clear(&mut form);
            assert_eq!(form.mandatory_fields_set(), Err(ValidationError::MandatoryFields));
        }
    }

    #[test]
    fn test_mandatory_fields_checked_first() {
        let mut form = filled();
        form.title.clear();
        form.isbn = "bad".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MandatoryFields));
    }

    #[test]
    fn test_names_have_no_spaces() {
        let mut form = filled();
        form.author_first = "J. R.".to_string();
        form.author_last = " Tolkien ".to_string();
        form.trans_first.clear();
        form.trans_last.clear();
        form.publisher = "Guy Richie".to_string();
        assert_eq!(form.names_have_no_spaces(), Err(ValidationError::SpacesInNames));

        let mut form = filled();
        form.publisher = "Penguin\tBooks".to_string();
        assert_eq!(form.validate(), Err(ValidationError::SpacesInNames));
    }

    #[test]
    fn test_translator() {
        let mut form = filled();
        form.trans_last.clear();
        assert_eq!(form.translator_is_valid(), Err(ValidationError::TranslatorIncomplete));

        form.trans_first.clear();
        assert_eq!(form.translator_is_valid(), Ok(()));
    }

    #[test]
    fn test_year() {
        let mut form = filled();
        form.pub_year = "12345".to_string();
        assert_eq!(form.year_is_valid(), Err(ValidationError::InvalidYear));

        form.pub_year = "1a00".to_string();
        assert_eq!(form.year_is_valid(), Err(ValidationError::InvalidYear));

        form.pub_year.clear();
        assert_eq!(form.year_is_valid(), Ok(()));
    }

    #[test]
    fn test_isbn() {
        let mut form = filled();
        form.isbn = "0123456789012".to_string();
        assert_eq!(form.isbn_is_valid(), Ok(()));

        form.isbn = "01234567890".to_string();
        assert_eq!(form.isbn_is_valid(), Err(ValidationError::InvalidIsbn));

        form.isbn = "01234a6789".to_string();
        assert_eq!(form.isbn_is_valid(), Err(ValidationError::InvalidIsbn));
    }

    #[test]
    fn test_shelf() {
        let mut form = filled();
        form.shelf_col.clear();
        assert_eq!(form.shelf_is_valid(), Err(ValidationError::ShelfIncomplete));

        form.shelf_row.clear();
        assert_eq!(form.shelf_is_valid(), Ok(()));

        let mut form = filled();
        form.shelf_col = "a".to_string();
        assert_eq!(form.shelf_is_valid(), Err(ValidationError::ShelfNotNumeric));

        form.shelf_row = "a".to_string();
        assert_eq!(form.shelf_is_valid(), Err(ValidationError::ShelfNotNumeric));
    }

    #[test]
    fn test_copies() {
        let mut form = filled();
        form.num_of_copies = "0".to_string();
        assert_eq!(form.copies_is_valid(), Err(ValidationError::InvalidCopies));

        form.num_of_copies = "a".to_string();
        assert_eq!(form.copies_is_valid(), Err(ValidationError::InvalidCopies));

        form.num_of_copies.clear();
        assert_eq!(form.copies_is_valid(), Err(ValidationError::InvalidCopies));
    }

    proptest! {
        #[test]
        fn isbn_accepts_ten_or_thirteen_digits(isbn in "([0-9]{10}|[0-9]{13})") {
            let form = BookForm { isbn, ..filled() };
            prop_assert_eq!(form.isbn_is_valid(), Ok(()));
        }

        #[test]
        fn isbn_rejects_other_lengths(isbn in "[0-9]{1,20}") {
            prop_assume!(isbn.len() != 10 && isbn.len() != 13);
            let form = BookForm { isbn, ..filled() };
            prop_assert_eq!(form.isbn_is_valid(), Err(ValidationError::InvalidIsbn));
        }
    }
}
