use plotters::style::RGBColor;

pub const BASELINE_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const INTERMEDIATE_ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const IMPROVED_RED: RGBColor = RGBColor(255, 0, 0);

/// Line colors by comparison arity: baseline first, most improved last.
pub fn variant_colors(count: usize) -> Vec<RGBColor> {
    match count {
        0 => Vec::new(),
        1 => vec![BASELINE_BLUE],
        2 => vec![BASELINE_BLUE, IMPROVED_RED],
        3 => vec![BASELINE_BLUE, INTERMEDIATE_ORANGE, IMPROVED_RED],
        n => (0..n).map(cycle_color).collect(),
    }
}

const CYCLE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

/// Default categorical cycle for per-file series.
pub fn cycle_color(index: usize) -> RGBColor {
    CYCLE[index % CYCLE.len()]
}

const BARS: [RGBColor; 5] = [
    RGBColor(0xff, 0x6b, 0x6b),
    RGBColor(0x4e, 0xcd, 0xc4),
    RGBColor(0x45, 0xb7, 0xd1),
    RGBColor(0x96, 0xce, 0xb4),
    RGBColor(0xff, 0xea, 0xa7),
];

/// Fill for the per-file total and size bars.
pub fn bar_color(index: usize) -> RGBColor {
    BARS[index % BARS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_way_runs_blue_orange_red() {
        let colors = variant_colors(3);
        assert_eq!(colors[0], BASELINE_BLUE);
        assert_eq!(colors[1], INTERMEDIATE_ORANGE);
        assert_eq!(colors[2], IMPROVED_RED);
        assert_eq!(variant_colors(2), vec![BASELINE_BLUE, IMPROVED_RED]);
    }

    #[test]
    fn cycles_wrap() {
        assert_eq!(cycle_color(10), cycle_color(0));
        assert_eq!(bar_color(5), bar_color(0));
    }
}
