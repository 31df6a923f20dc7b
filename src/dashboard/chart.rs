//! The spending-by-category doughnut chart.
//!
//! The chart is generated as JSON configuration for the ECharts library and
//! rendered as a container plus an inline script. The script runs every time
//! HTMX swaps the dashboard data in, so it disposes the previous chart before
//! drawing a new one.

use charming::{
    Chart,
    component::Legend,
    element::{Color, JsFunction, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::transaction::Transaction;

pub const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

const CHART_ID: &str = "spending-chart";

const PALETTE: [&str; 7] = [
    "#312e81", "#3730a3", "#4338ca", "#4f46e5", "#6366f1", "#818cf8", "#a5b4fc",
];

/// Sum the amounts per category label in the order the categories first appear.
///
/// Transactions without a category are counted as "Uncategorized".
pub fn category_totals(transactions: &[Transaction]) -> Vec<(String, f64)> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for transaction in transactions {
        let label = transaction.category_label();

        match totals.iter_mut().find(|(category, _)| category == label) {
            Some((_, total)) => *total += transaction.amount,
            None => totals.push((label.to_owned(), transaction.amount)),
        }
    }

    totals
}

pub fn spending_chart(transactions: &[Transaction]) -> Chart {
    let totals = category_totals(transactions);
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|(category, total)| (*total, category.as_str()))
        .collect();

    Chart::new()
        .color(PALETTE.into_iter().map(Color::from).collect())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("0%"))
        .series(
            Pie::new()
                .name("Amount Spent")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return currencyFormatter.format(number || 0);",
    )
}

/// Render the chart container and the script that draws `chart` into it.
pub fn chart_view(chart: &Chart) -> Markup {
    html! {
        div
            id=(CHART_ID)
            class="min-h-[320px] w-full"
        {}

        script { (chart_script(chart)) }
    }
}

/// Escape JSON for use inside a `<script>` element.
///
/// Category names come from users, so a `</script>` inside a string would
/// otherwise end the element early. `<\/` is the same string to JavaScript.
fn escape_for_script(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn chart_script(chart: &Chart) -> PreEscaped<String> {
    let options = escape_for_script(&chart.to_string());

    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{CHART_ID}");
            if (!chartDom || typeof echarts === "undefined") return;

            if (window.spendingChart) {{
                window.spendingChart.dispose();
            }}
            const existing = echarts.getInstanceByDom(chartDom);
            if (existing) {{
                existing.dispose();
            }}

            const chart = echarts.init(chartDom);
            chart.setOption({options});
            window.spendingChart = chart;

            if (!window.spendingChartResize) {{
                window.spendingChartResize = () => window.spendingChart && window.spendingChart.resize();
                window.addEventListener('resize', window.spendingChartResize);
            }}
        }})();"#
    ))
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::transaction::{Transaction, UNCATEGORIZED};

    use super::{category_totals, chart_view, spending_chart};

    fn transaction(id: i64, amount: f64, category: Option<&str>) -> Transaction {
        Transaction {
            id,
            description: format!("Transaction {id}"),
            amount,
            category: category.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn totals_group_by_category_in_first_seen_order() {
        let transactions = vec![
            transaction(1, 3.5, Some("Food")),
            transaction(2, 10.0, None),
            transaction(3, 1.5, Some("Food")),
        ];

        let totals = category_totals(&transactions);

        assert_eq!(
            totals,
            vec![
                ("Food".to_owned(), 5.0),
                (UNCATEGORIZED.to_owned(), 10.0)
            ]
        );
    }

    #[test]
    fn totals_of_empty_list_are_empty() {
        assert_eq!(category_totals(&[]), vec![]);
    }

    #[test]
    fn chart_contains_categories() {
        let transactions = vec![
            transaction(1, 3.5, Some("Food")),
            transaction(2, 10.0, None),
        ];

        let options = spending_chart(&transactions).to_string();

        assert!(options.contains("\"Food\""), "got {options}");
        assert!(options.contains("\"Uncategorized\""), "got {options}");
        assert!(options.contains("\"pie\""), "got {options}");
    }

    #[test]
    fn category_cannot_close_script_element() {
        let transactions = vec![transaction(
            1,
            4.0,
            Some("</script><script>alert(1)</script>"),
        )];

        let html = Html::parse_fragment(&chart_view(&spending_chart(&transactions)).into_string());

        let scripts: Vec<_> = html.select(&Selector::parse("script").unwrap()).collect();
        assert_eq!(scripts.len(), 1);
        let script = scripts[0].text().collect::<String>();
        assert!(script.contains("<\\/script>"), "got {script}");
        assert!(script.contains("chart.setOption("), "got {script}");
    }

    #[test]
    fn script_disposes_previous_chart_before_drawing() {
        let markup = chart_view(&spending_chart(&[])).into_string();

        let dispose = markup
            .find("window.spendingChart.dispose()")
            .expect("script should dispose the previous chart");
        let init = markup
            .find("echarts.init(")
            .expect("script should draw the chart");
        assert!(dispose < init, "dispose must happen before init");
    }
}
