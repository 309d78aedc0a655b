//! Core expense domain types.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    category::{Category, CategoryId},
    database_id::DatabaseId,
    form::{FieldErrors, RawForm, calendar_date, positive_integer, required_text},
    tag::{Tag, TagId},
};

pub(crate) const DESCRIPTION_REQUIRED: &str = "Description is required";
pub(crate) const CATEGORY_REQUIRED: &str = "Category is required";

/// Database identifier for an expense.
pub type ExpenseId = DatabaseId;

/// An event where money was spent, together with its category and tags.
///
/// This is the denormalised shape returned by listings, so callers do not
/// need to look up the category or tags separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// How much was spent, in whole currency units. Always positive.
    pub amount: i64,
    /// What the money was spent on.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
    /// The category the expense belongs to.
    pub category: Category,
    /// The tags attached to the expense, ordered by name.
    pub tags: Vec<Tag>,
    /// When the expense was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated fields of an expense, used for both creation and full
/// replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// How much was spent, in whole currency units. Always positive.
    pub amount: i64,
    /// What the money was spent on, trimmed and non-empty.
    pub description: String,
    /// When the money was spent.
    pub date: Date,
    /// The category the expense belongs to.
    pub category_id: CategoryId,
    /// The complete set of tags for the expense, without duplicates.
    pub tag_ids: Vec<TagId>,
}

impl NewExpense {
    /// Validate the `amount`, `description`, `date`, `categoryId` and `tags`
    /// fields of `form`.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found, not just the first.
    pub fn from_form(form: &RawForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        match Self::parse(form, &mut errors) {
            Some(expense) if errors.is_empty() => Ok(expense),
            _ => Err(errors),
        }
    }

    /// Validate `form`, recording problems in `errors`.
    ///
    /// Returns `None` if any of the expense's own fields are invalid.
    pub(crate) fn parse(form: &RawForm, errors: &mut FieldErrors) -> Option<Self> {
        let amount = errors.check(positive_integer(form.text("amount")));
        let description = errors.check(required_text(
            form.text("description"),
            DESCRIPTION_REQUIRED,
        ));
        let date = errors.check(calendar_date(form.text("date")));
        let category_id = errors.check(required_text(form.text("categoryId"), CATEGORY_REQUIRED));
        let tag_ids = parse_tag_ids(form);

        Some(Self {
            amount: amount?,
            description: description?,
            date: date?,
            category_id: category_id?,
            tag_ids,
        })
    }
}

/// Collect the submitted tag IDs, skipping blanks and repeats.
fn parse_tag_ids(form: &RawForm) -> Vec<TagId> {
    let mut tag_ids: Vec<TagId> = Vec::new();

    for tag_id in form.get_all("tags").map(str::trim) {
        if !tag_id.is_empty() && !tag_ids.iter().any(|existing| existing == tag_id) {
            tag_ids.push(tag_id.to_owned());
        }
    }

    tag_ids
}

#[cfg(test)]
mod new_expense_tests {
    use time::macros::date;

    use crate::form::RawForm;

    use super::NewExpense;

    fn valid_form() -> Vec<(&'static str, &'static str)> {
        vec![
            ("amount", "25"),
            ("description", "Coffee beans"),
            ("date", "2024-01-01"),
            ("categoryId", "c1"),
        ]
    }

    #[test]
    fn parses_valid_form() {
        let mut fields = valid_form();
        fields.push(("tags", "t1"));
        fields.push(("tags", "t2"));

        let expense = NewExpense::from_form(&RawForm::from_iter(fields));

        assert_eq!(
            expense,
            Ok(NewExpense {
                amount: 25,
                description: "Coffee beans".to_owned(),
                date: date!(2024 - 01 - 01),
                category_id: "c1".to_owned(),
                tag_ids: vec!["t1".to_owned(), "t2".to_owned()],
            })
        );
    }

    #[test]
    fn tags_are_optional() {
        let expense = NewExpense::from_form(&RawForm::from_iter(valid_form())).unwrap();

        assert!(expense.tag_ids.is_empty());
    }

    #[test]
    fn duplicate_and_blank_tags_are_dropped() {
        let mut fields = valid_form();
        fields.extend([("tags", "t1"), ("tags", ""), ("tags", "t2"), ("tags", "t1")]);

        let expense = NewExpense::from_form(&RawForm::from_iter(fields)).unwrap();

        assert_eq!(expense.tag_ids, vec!["t1".to_owned(), "t2".to_owned()]);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let fields = [
            ("amount", "-5"),
            ("description", "x"),
            ("date", "2024-01-01"),
            ("categoryId", "c1"),
        ];

        let errors = NewExpense::from_form(&RawForm::from_iter(fields)).unwrap_err();

        assert_eq!(errors.messages(), ["Amount must be a positive number"]);
    }

    #[test]
    fn every_problem_is_reported_in_field_order() {
        let errors = NewExpense::from_form(&RawForm::default()).unwrap_err();

        assert_eq!(
            errors.messages(),
            [
                "Amount must be a positive number",
                "Description is required",
                "Date must be valid",
                "Category is required",
            ]
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let mut fields = valid_form();
        fields[2] = ("date", "2024-13-01");

        let errors = NewExpense::from_form(&RawForm::from_iter(fields)).unwrap_err();

        assert_eq!(errors.messages(), ["Date must be valid"]);
    }
}
