mod common;

use common::row;
use rust_decimal_macros::dec;
use shiprevenue::chart::{render_svg, TITLE, Y_DESC};
use shiprevenue::{CountryRevenueAggregate, RevenueTable};

#[test]
fn renders_one_label_per_country() {
    let aggregate = RevenueTable::new(vec![
        row(dec!(55.00), 40, dec!(0.0), "Germany"),
        row(dec!(12.00), 3, dec!(0.1), "Sweden"),
        row(dec!(31.23), 20, dec!(0.05), "Venezuela"),
    ])
    .revenue_by_country();

    let svg = render_svg(&aggregate).unwrap();
    assert!(svg.contains(TITLE));
    assert!(svg.contains(Y_DESC));
    for country in ["Germany", "Sweden", "Venezuela"] {
        assert!(svg.contains(country), "missing label {}", country);
    }
    assert!(svg.contains("2,000"));
    // country labels are drawn vertically
    assert!(svg.contains("rotate(90"));
}

#[test]
fn renders_empty_aggregate() {
    let svg = render_svg(&CountryRevenueAggregate::default()).unwrap();
    assert!(svg.contains(TITLE));
}
