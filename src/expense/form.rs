//! The fields shared by the new and edit expense forms.

use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    category::{Category, list_categories},
    endpoints,
    expense::Expense,
    form::RawForm,
    html::{FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE},
    stores::{CategoryStore, TagStore},
    tag::{Tag, list_tags},
};

/// The values shown in an expense form.
///
/// These are kept as submitted so that a rejected form can be shown again
/// exactly as the user left it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ExpenseFormValues {
    pub amount: String,
    pub description: String,
    pub date: String,
    pub category_id: String,
    pub tag_ids: Vec<String>,
}

impl ExpenseFormValues {
    /// An empty form dated `today`.
    pub fn new(today: Date) -> Self {
        Self {
            date: today.to_string(),
            ..Default::default()
        }
    }

    pub fn from_form(form: &RawForm) -> Self {
        Self {
            amount: form.text("amount").to_owned(),
            description: form.text("description").to_owned(),
            date: form.text("date").to_owned(),
            category_id: form.text("categoryId").to_owned(),
            tag_ids: form.get_all("tags").map(str::to_owned).collect(),
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            description: expense.description.clone(),
            date: expense.date.to_string(),
            category_id: expense.category.id.clone(),
            tag_ids: expense.tags.iter().map(|tag| tag.id.clone()).collect(),
        }
    }

    fn has_tag(&self, tag_id: &str) -> bool {
        self.tag_ids.iter().any(|id| id == tag_id)
    }
}

/// The categories and tags an expense can be assigned.
#[derive(Debug, Default)]
pub(crate) struct ExpenseFormOptions {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl ExpenseFormOptions {
    pub fn load(
        category_store: &impl CategoryStore,
        tag_store: &impl TagStore,
    ) -> Result<Self, Error> {
        Ok(Self {
            categories: list_categories(category_store)?,
            tags: list_tags(tag_store)?,
        })
    }
}

pub(crate) fn expense_form_fields(
    values: &ExpenseFormValues,
    options: &ExpenseFormOptions,
) -> Markup {
    html! {
        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

            input
                name="amount"
                id="amount"
                type="number"
                step="1"
                min="1"
                placeholder="0"
                value=(values.amount)
                required
                autofocus
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "Description" }

            input
                name="description"
                id="description"
                type="text"
                placeholder="e.g. Weekly groceries"
                value=(values.description)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="date" class=(FORM_LABEL_STYLE) { "Date" }

            input
                name="date"
                id="date"
                type="date"
                value=(values.date)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="categoryId" class=(FORM_LABEL_STYLE) { "Category" }

            select
                name="categoryId"
                id="categoryId"
                required
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "Select a category" }

                @for category in &options.categories {
                    option
                        value=(category.id)
                        selected[category.id == values.category_id]
                    {
                        (category.name)
                    }
                }
            }

            @if options.categories.is_empty() {
                p class="mt-2 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Every expense needs a category. "
                    a href=(endpoints::NEW_CATEGORY_VIEW) class=(LINK_STYLE)
                    {
                        "Create a category"
                    }
                }
            }
        }

        @if !options.tags.is_empty() {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { "Tags" }

                div class="flex flex-wrap gap-4"
                {
                    @for tag in &options.tags {
                        @let input_id = format!("tag-{}", tag.id);

                        div class="flex items-center gap-2"
                        {
                            input
                                name="tags"
                                id=(input_id)
                                type="checkbox"
                                value=(tag.id)
                                checked[values.has_tag(&tag.id)]
                                class=(FORM_CHECKBOX_STYLE);

                            label for=(input_id) class="text-sm text-gray-900 dark:text-white"
                            {
                                (tag.name)
                            }
                        }
                    }
                }
            }
        }
    }
}
