//! ECharts chart options for the statistics report.
//!
//! Each chart covers one transaction group:
//! - **Pie**: each category's share of the group's total
//! - **Bar**: each category's total, one bar per category

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{AxisLabel, AxisType, Label, Tooltip, Trigger},
    series::{Pie, bar},
};

use crate::statistics::aggregation::{CategoryTotals, sorted_totals};

pub(super) fn pie_chart(title: &str, totals: &CategoryTotals) -> Chart {
    let data: Vec<(f64, &str)> = sorted_totals(totals)
        .into_iter()
        .map(|(category, amount)| (amount.abs(), category))
        .collect();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .series(
            Pie::new()
                .name(title)
                .radius("60%")
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}

pub(super) fn bar_chart(title: &str, totals: &CategoryTotals) -> Chart {
    let (labels, values): (Vec<String>, Vec<f64>) = sorted_totals(totals)
        .into_iter()
        .map(|(category, amount)| (category.to_owned(), amount))
        .unzip();

    Chart::new()
        .title(Title::new().text(title).left("center"))
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .axis_label(AxisLabel::new().rotate(45.0))
                .data(labels),
        )
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name(title).data(values))
}
