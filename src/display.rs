//! Result region state: what the last calculation shows on screen

use ratatui::style::Color;

use crate::api::BmiResponse;

/// Shown in every result field while there is nothing to show
pub const PLACEHOLDER: &str = "—";

/// BMI values mapped onto the progress bar. Anything outside is clamped.
const SCALE_MIN: f64 = 12.0;
const SCALE_MAX: f64 = 40.0;

/// Category as reported by the service. Only the three names below are
/// matched exactly; any other value gets the severe palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Severe,
}

impl BmiCategory {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Underweight" => BmiCategory::Underweight,
            "Normal" => BmiCategory::Normal,
            "Overweight" => BmiCategory::Overweight,
            _ => BmiCategory::Severe,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            BmiCategory::Underweight => Palette::new((0xfd, 0xe6, 0x8a), (0xfc, 0xa5, 0xa5)),
            BmiCategory::Normal => Palette::new((0xbb, 0xf7, 0xd0), (0x86, 0xef, 0xac)),
            BmiCategory::Overweight => Palette::new((0xff, 0xd2, 0x7f), (0xff, 0x7b, 0x7b)),
            BmiCategory::Severe => Palette::new((0xff, 0x9f, 0xb3), (0xfb, 0x71, 0x85)),
        }
    }
}

/// Two-stop gradient used to fill the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub start: (u8, u8, u8),
    pub end: (u8, u8, u8),
}

impl Palette {
    const fn new(start: (u8, u8, u8), end: (u8, u8, u8)) -> Self {
        Self { start, end }
    }

    /// Color at position `t` in [0, 1] along the gradient
    pub fn at(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| -> u8 {
            (a as f64 + (b as f64 - a as f64) * t).round() as u8
        };
        Color::Rgb(
            lerp(self.start.0, self.end.0),
            lerp(self.start.1, self.end.1),
            lerp(self.start.2, self.end.2),
        )
    }
}

/// Map a BMI value onto [0, 1] for the progress bar
pub fn progress_fraction(bmi: f64) -> f64 {
    let fraction = (bmi - SCALE_MIN) / (SCALE_MAX - SCALE_MIN);
    if fraction.is_nan() {
        return 0.0;
    }
    fraction.clamp(0.0, 1.0)
}

/// Everything the result region displays
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub visible: bool,
    pub bmi: String,
    pub category: String,
    pub note: String,
    pub healthy_range: String,
    pub progress: f64,
    pub palette: Option<Palette>,
}

impl Default for ResultView {
    fn default() -> Self {
        Self {
            visible: false,
            bmi: PLACEHOLDER.to_string(),
            category: PLACEHOLDER.to_string(),
            note: PLACEHOLDER.to_string(),
            healthy_range: PLACEHOLDER.to_string(),
            progress: 0.0,
            palette: None,
        }
    }
}

impl ResultView {
    /// Hide the region and blank every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fill the region from a successful response and reveal it
    pub fn render(&mut self, response: &BmiResponse) {
        self.bmi = response.bmi.to_string();
        self.category = response.category.clone();
        self.note = response.note.clone();
        self.healthy_range = format!(
            "{} - {}",
            response.healthy_weight_min_kg, response.healthy_weight_max_kg
        );
        self.progress = progress_fraction(response.bmi);
        self.palette = Some(BmiCategory::from_label(&response.category).palette());
        self.visible = true;
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(bmi: f64, category: &str) -> BmiResponse {
        BmiResponse {
            bmi,
            category: category.to_string(),
            note: "Healthy".to_string(),
            healthy_weight_min_kg: 55.0,
            healthy_weight_max_kg: 75.0,
        }
    }

    #[test]
    fn test_progress_endpoints_and_clamping() {
        assert_eq!(progress_fraction(12.0), 0.0);
        assert_eq!(progress_fraction(40.0), 1.0);
        assert_eq!(progress_fraction(6.0), 0.0);
        assert_eq!(progress_fraction(50.0), 1.0);
        assert_eq!(progress_fraction(26.0), 0.5);
        assert_eq!(progress_fraction(f64::NAN), 0.0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut last = progress_fraction(0.0);
        for i in 1..=600 {
            let next = progress_fraction(i as f64 / 10.0);
            assert!(next >= last);
            last = next;
        }
    }

    #[test]
    fn test_category_exact_match() {
        assert_eq!(BmiCategory::from_label("Underweight"), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_label("Normal"), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_label("Overweight"), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_label("Obese"), BmiCategory::Severe);
        assert_eq!(BmiCategory::from_label("Obesity"), BmiCategory::Severe);
        assert_eq!(BmiCategory::from_label("normal"), BmiCategory::Severe);
        assert_eq!(BmiCategory::from_label(" Normal"), BmiCategory::Severe);
    }

    #[test]
    fn test_palettes_are_distinct() {
        let all = [
            BmiCategory::Underweight,
            BmiCategory::Normal,
            BmiCategory::Overweight,
            BmiCategory::Severe,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.palette(), b.palette());
            }
        }
    }

    #[test]
    fn test_gradient_endpoints() {
        let palette = BmiCategory::Normal.palette();
        assert_eq!(palette.at(0.0), Color::Rgb(0xbb, 0xf7, 0xd0));
        assert_eq!(palette.at(1.0), Color::Rgb(0x86, 0xef, 0xac));
        assert_eq!(palette.at(7.0), palette.at(1.0));
    }

    #[test]
    fn test_render_success() {
        let mut view = ResultView::default();
        view.render(&response(22.5, "Normal"));

        assert!(view.visible);
        assert_eq!(view.bmi, "22.5");
        assert_eq!(view.category, "Normal");
        assert_eq!(view.note, "Healthy");
        assert_eq!(view.healthy_range, "55 - 75");
        assert_eq!(view.palette, Some(BmiCategory::Normal.palette()));
        assert!((view.progress_percent() - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_category_uses_severe_palette() {
        let mut view = ResultView::default();
        view.render(&response(35.0, "Obese"));
        assert_eq!(view.category, "Obese");
        assert_eq!(view.palette, Some(BmiCategory::Severe.palette()));
    }

    #[test]
    fn test_reset_restores_placeholders() {
        let mut view = ResultView::default();
        view.render(&response(30.0, "Overweight"));
        view.reset();

        assert!(!view.visible);
        assert_eq!(view.bmi, PLACEHOLDER);
        assert_eq!(view.category, PLACEHOLDER);
        assert_eq!(view.note, PLACEHOLDER);
        assert_eq!(view.healthy_range, PLACEHOLDER);
        assert_eq!(view.progress, 0.0);
        assert_eq!(view.palette, None);
    }
}
