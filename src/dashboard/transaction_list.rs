//! The list of transactions with an editable category for each one.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{BUTTON_SMALL_STYLE, FORM_TEXT_INPUT_STYLE, format_currency},
    transaction::{Transaction, TransactionId},
    view::SAVE_CATEGORY,
};

pub const EMPTY_LIST_MESSAGE: &str = "No transactions yet. Add one above or upload a CSV.";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading transactions. Is the server running?";

/// Render one row per transaction, most recently added first.
///
/// The API returns transactions in the order they were added, so the list is
/// simply reversed rather than sorted by date.
pub fn transaction_list_view(transactions: &[Transaction]) -> Markup {
    html! {
        div id="transaction-list" class="divide-y divide-gray-200 dark:divide-gray-700"
        {
            @if transactions.is_empty()
            {
                p class="py-3 text-center text-gray-500 dark:text-gray-400" { (EMPTY_LIST_MESSAGE) }
            }

            @for transaction in transactions.iter().rev()
            {
                (transaction_row(transaction))
            }
        }
    }
}

/// Render the message shown in place of the list when it could not be loaded.
pub fn transaction_list_error_view() -> Markup {
    html! {
        div id="transaction-list"
        {
            p class="py-3 text-center text-red-500" { (LOAD_ERROR_MESSAGE) }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    html! {
        div class="py-3 grid grid-cols-3 gap-2 items-center"
        {
            div class="col-span-3"
            {
                p class="font-medium text-gray-800 dark:text-gray-100" { (transaction.description) }
                p class="text-sm text-gray-500 dark:text-gray-400" { (format_currency(transaction.amount)) }
            }

            (category_form(transaction.id, transaction.category_label()))
        }
    }
}

pub fn category_form_id(id: TransactionId) -> String {
    format!("category-form-{id}")
}

/// The form for changing a transaction's category, with `category` as the
/// input's value and the save button ready for input.
///
/// On success the whole dashboard data section is replaced. On failure the
/// form replaces itself, so the user keeps what they typed.
pub fn category_form(id: TransactionId, category: &str) -> Markup {
    let form_id = category_form_id(id);
    let input_id = format!("category-{id}");

    html! {
        form
            id=(form_id)
            class="col-span-3 grid grid-cols-3 gap-2 items-center"
            hx-put=(format_endpoint(endpoints::TRANSACTION_API, id))
            hx-target="#dashboard-data"
            hx-swap="outerHTML"
            hx-target-error="this"
            hx-disabled-elt="find button"
        {
            div class="col-span-2"
            {
                label for=(input_id) class="sr-only" { "Category" }

                input
                    type="text"
                    name="category"
                    id=(input_id)
                    value=(category)
                    class=(FORM_TEXT_INPUT_STYLE)
                    required;
            }

            (SAVE_CATEGORY.idle().submit_button(BUTTON_SMALL_STYLE))
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};

    use crate::{
        test_utils::{assert_hx_endpoint, assert_valid_html},
        transaction::Transaction,
    };

    use super::{EMPTY_LIST_MESSAGE, LOAD_ERROR_MESSAGE, transaction_list_error_view, transaction_list_view};

    fn transaction(id: i64, description: &str, amount: f64, category: Option<&str>) -> Transaction {
        Transaction {
            id,
            description: description.to_owned(),
            amount,
            category: category.map(ToOwned::to_owned),
        }
    }

    fn parse(markup: maud::Markup) -> Html {
        let html = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&html);
        html
    }

    fn forms(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("form").unwrap()).collect()
    }

    fn category_value(form: &ElementRef<'_>) -> String {
        form.select(&Selector::parse("input[name=category]").unwrap())
            .next()
            .expect("category input missing")
            .value()
            .attr("value")
            .unwrap_or_default()
            .to_owned()
    }

    #[test]
    fn rows_are_rendered_in_reverse_order() {
        let transactions = vec![
            transaction(1, "Coffee", 3.5, Some("Food")),
            transaction(2, "Rent", 1200.0, None),
        ];

        let html = parse(transaction_list_view(&transactions));

        let forms = forms(&html);
        assert_eq!(forms.len(), 2);
        assert_hx_endpoint(&forms[0], "/api/transactions/2", "hx-put");
        assert_hx_endpoint(&forms[1], "/api/transactions/1", "hx-put");
    }

    #[test]
    fn row_shows_description_amount_and_category() {
        let html = parse(transaction_list_view(&[transaction(
            1,
            "Coffee",
            3.5,
            Some("Food"),
        )]));

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Coffee"), "got {text}");
        assert!(text.contains("$3.50"), "got {text}");
        assert_eq!(category_value(&forms(&html)[0]), "Food");
    }

    #[test]
    fn missing_category_is_shown_as_uncategorized() {
        let html = parse(transaction_list_view(&[transaction(1, "Rent", 1200.0, None)]));

        assert_eq!(category_value(&forms(&html)[0]), "Uncategorized");
    }

    #[test]
    fn save_control_is_idle() {
        let html = parse(transaction_list_view(&[transaction(1, "Rent", 1200.0, None)]));

        let button = forms(&html)[0]
            .select(&Selector::parse("button").unwrap())
            .next()
            .expect("save button missing");
        assert!(button.value().attr("disabled").is_none());
        let label = button
            .select(&Selector::parse(".control-label").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(label, "Save");
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let html = parse(transaction_list_view(&[]));

        let text = html.root_element().text().collect::<String>();
        assert_eq!(text.trim(), EMPTY_LIST_MESSAGE);
        assert!(forms(&html).is_empty());
    }

    #[test]
    fn error_view_shows_message() {
        let html = parse(transaction_list_error_view());

        let text = html.root_element().text().collect::<String>();
        assert_eq!(text.trim(), LOAD_ERROR_MESSAGE);
    }
}
