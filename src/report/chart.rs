use rust_decimal::Decimal;
use std::fmt::Write;

use crate::constants::{CASH_SLICE_COLOR, FALLBACK_SLICE_COLORS};
use crate::portfolio::HoldingRow;
use crate::utils::{escape_html, format_fixed, round_display};

/// Radius giving a circumference of 100, so dash lengths are percentages
const RADIUS: &str = "15.91549430918954";
const CENTER: u32 = 21;
const RING_WIDTH: u32 = 6;

/// Offset that moves the first slice's start to 12 o'clock
const TOP_OFFSET: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// (css class, pixel size) for each rendered copy of the chart
const SIZES: [(&str, u32); 2] = [("hidden sm:block", 240), ("block sm:hidden", 160)];

/// Donut chart markup, one desktop and one mobile SVG.
///
/// Slices run clockwise from the top, largest weight first.
pub fn render_donut_chart(rows: &[HoldingRow]) -> String {
    let mut slices: Vec<&HoldingRow> = rows
        .iter()
        .filter(|row| row.weight_percent > Decimal::ZERO)
        .collect();
    slices.sort_by(|a, b| b.weight_percent.cmp(&a.weight_percent));

    let rings = render_slices(&slices);

    SIZES
        .iter()
        .map(|(class, px)| {
            format!(
                concat!(
                    "<svg class=\"{class}\" width=\"{px}\" height=\"{px}\" viewBox=\"0 0 42 42\" ",
                    "role=\"img\" aria-label=\"포트폴리오 구성\">",
                    "<circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"transparent\" stroke=\"#f3f4f6\" stroke-width=\"{w}\"></circle>",
                    "{rings}</svg>"
                ),
                class = class,
                px = px,
                c = CENTER,
                r = RADIUS,
                w = RING_WIDTH,
                rings = rings,
            )
        })
        .collect()
}

fn render_slices(slices: &[&HoldingRow]) -> String {
    let mut markup = String::new();
    let mut cumulative = Decimal::ZERO;
    let mut palette = FALLBACK_SLICE_COLORS.iter().cycle();

    for row in slices {
        let share = row.weight_percent;
        let color = if row.is_cash {
            CASH_SLICE_COLOR.to_string()
        } else {
            match row.logo_color {
                Some(color) => color.to_hex(),
                None => palette.next().copied().unwrap_or(CASH_SLICE_COLOR).to_string(),
            }
        };

        let _ = write!(
            markup,
            concat!(
                "<circle cx=\"{c}\" cy=\"{c}\" r=\"{r}\" fill=\"transparent\" stroke=\"{color}\" ",
                "stroke-width=\"{w}\" stroke-dasharray=\"{dash} {gap}\" stroke-dashoffset=\"{offset}\">",
                "<title>{name} {weight}%</title></circle>"
            ),
            c = CENTER,
            r = RADIUS,
            color = color,
            w = RING_WIDTH,
            dash = svg_number(share),
            gap = svg_number(Decimal::ONE_HUNDRED - share),
            offset = svg_number(TOP_OFFSET - cumulative),
            name = escape_html(&row.name),
            weight = format_fixed(share, 2),
        );

        cumulative += share;
    }

    markup
}

fn svg_number(value: Decimal) -> String {
    round_display(value, 4).normalize().to_string()
}
