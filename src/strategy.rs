//! # Lure Strategy Selector
//!
//! Picks the tie-rubber pattern for an hour: a primary colour and skirt shape,
//! a backup pattern to rotate to, a retrieve speed, a hook size, and whether
//! to add bait.
//!
//! The primary colour comes from an ordered rule list; the first rule whose
//! condition holds wins. Each rule names two colours and the hour's parity
//! picks one, so consecutive hours alternate instead of repeating one
//! recommendation all morning.
//!
//! The backup is never derived from conditions. It is looked up in
//! [`COLOR_ROTATION`] and [`SHAPE_ROTATION`], keyed on the primary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::StrategyConfig;

/// Water-temperature drop per hour (°C) that calls for dark colours.
const COOLING_DELTA_C: f64 = -0.1;
/// Hours after sunrise still treated as the morning bite.
const POST_DAWN_HOURS: u32 = 2;

const HIGH_WAVE_SCORE: u8 = 50;
const SHORT_SKIRT_SCORE: u8 = 30;

/// Water (°C) at or below which everything slows down.
const COLD_RETRIEVE_C: f64 = 12.0;
/// Water (°C) at or above which a fast retrieve pays off.
const WARM_RETRIEVE_C: f64 = 20.0;
const FAST_SCORE: u8 = 60;
const MEDIUM_SCORE: u8 = 40;
const DEAD_SLOW_SCORE: u8 = 20;
/// Below this the lure alone will not do; add bait.
const BAIT_SCORE: u8 = 10;

/// Tie colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LureColor {
    RedOrange,
    Pink,
    Chartreuse,
    OrangeZebra,
    OrangeGold,
    HoloZebra,
    Cola,
    BlackSeaweed,
    MudGold,
    RedGlow,
    GreenGold,
    SilverGlitter,
    DeepRed,
    Purple,
    GoldFlash,
    PinkFlash,
    /// Backup-only colour
    Green,
}

impl LureColor {
    pub fn label(self) -> &'static str {
        match self {
            LureColor::RedOrange => "red-orange",
            LureColor::Pink => "pink",
            LureColor::Chartreuse => "chartreuse",
            LureColor::OrangeZebra => "orange zebra",
            LureColor::OrangeGold => "orange-gold",
            LureColor::HoloZebra => "holo zebra",
            LureColor::Cola => "cola",
            LureColor::BlackSeaweed => "black/seaweed",
            LureColor::MudGold => "mud gold",
            LureColor::RedGlow => "red glow",
            LureColor::GreenGold => "green-gold",
            LureColor::SilverGlitter => "silver glitter",
            LureColor::DeepRed => "deep red",
            LureColor::Purple => "purple",
            LureColor::GoldFlash => "gold flash",
            LureColor::PinkFlash => "pink flash",
            LureColor::Green => "green",
        }
    }
}

impl fmt::Display for LureColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Skirt profile, roughly ordered by how much it moves water.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkirtShape {
    Slim,
    Short,
    HighWave,
    /// Backup-only shape
    Curly,
    LongStraight,
    WideFlat,
}

impl SkirtShape {
    pub fn label(self) -> &'static str {
        match self {
            SkirtShape::Slim => "slim",
            SkirtShape::Short => "short",
            SkirtShape::HighWave => "high-wave",
            SkirtShape::Curly => "curly",
            SkirtShape::LongStraight => "long straight",
            SkirtShape::WideFlat => "wide flat",
        }
    }
}

impl fmt::Display for SkirtShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A colour and shape combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub color: LureColor,
    pub shape: SkirtShape,
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.color, self.shape)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetrieveSpeed {
    Fast,
    Medium,
    Slow,
    DeadSlow,
}

impl fmt::Display for RetrieveSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RetrieveSpeed::Fast => "fast",
            RetrieveSpeed::Medium => "medium",
            RetrieveSpeed::Slow => "slow",
            RetrieveSpeed::DeadSlow => "dead slow",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookSize {
    Large,
    Medium,
    Small,
    ExtraSmall,
}

impl fmt::Display for HookSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HookSize::Large => "L",
            HookSize::Medium => "M",
            HookSize::Small => "S",
            HookSize::ExtraSmall => "SS",
        })
    }
}

/// What the selector looks at for one hour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrategyInputs {
    pub hour: u32,
    pub sunrise_hour: u32,
    pub score: u8,
    /// Hour-over-hour water temperature change (°C)
    pub temp_delta: f64,
    pub month: u32,
    pub temp_c: f64,
    pub cloud_cover_pct: f64,
    pub rain_mm: f64,
}

/// Tackle advice for one hour.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StrategyRecommendation {
    pub primary: Pattern,
    pub secondary: Pattern,
    pub retrieve: RetrieveSpeed,
    pub hook: HookSize,
    /// Tip the hook with bait
    pub bait_augment: bool,
    /// Name of the colour rule that fired
    pub reason: &'static str,
}

/// One entry of the colour decision list.
pub struct ColorRule {
    pub name: &'static str,
    pub applies: fn(&StrategyInputs, &StrategyConfig) -> bool,
    /// Colour for even hours
    pub even: LureColor,
    /// Colour for odd hours
    pub odd: LureColor,
}

impl ColorRule {
    fn pick(&self, hour: u32) -> LureColor {
        if hour % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

fn heavy_rain(i: &StrategyInputs, c: &StrategyConfig) -> bool {
    i.rain_mm >= c.heavy_rain_mm
}

fn dawn(i: &StrategyInputs, _: &StrategyConfig) -> bool {
    i.hour <= i.sunrise_hour
}

fn cooling_water(i: &StrategyInputs, _: &StrategyConfig) -> bool {
    i.temp_delta <= COOLING_DELTA_C
}

fn bait_season(i: &StrategyInputs, c: &StrategyConfig) -> bool {
    c.bait_season_months.contains(&i.month)
}

fn winter_low_activity(i: &StrategyInputs, c: &StrategyConfig) -> bool {
    c.winter_months.contains(&i.month)
        && i.temp_c < c.winter_temp_below_c
        && i.score < c.winter_score_below
}

fn heavy_cloud(i: &StrategyInputs, c: &StrategyConfig) -> bool {
    i.cloud_cover_pct >= c.heavy_cloud_pct
}

fn morning_bite(i: &StrategyInputs, _: &StrategyConfig) -> bool {
    i.hour <= i.sunrise_hour + POST_DAWN_HOURS
}

fn always(_: &StrategyInputs, _: &StrategyConfig) -> bool {
    true
}

/// Colour rules in priority order.
pub static COLOR_RULES: [ColorRule; 7] = [
    ColorRule {
        name: "heavy rain",
        applies: heavy_rain,
        even: LureColor::MudGold,
        odd: LureColor::RedGlow,
    },
    ColorRule {
        name: "dawn",
        applies: dawn,
        even: LureColor::Chartreuse,
        odd: LureColor::OrangeZebra,
    },
    ColorRule {
        name: "cooling water",
        applies: cooling_water,
        even: LureColor::Cola,
        odd: LureColor::BlackSeaweed,
    },
    ColorRule {
        name: "sand-eel season",
        applies: bait_season,
        even: LureColor::GreenGold,
        odd: LureColor::SilverGlitter,
    },
    ColorRule {
        name: "winter low activity",
        applies: winter_low_activity,
        even: LureColor::DeepRed,
        odd: LureColor::Purple,
    },
    ColorRule {
        name: "heavy cloud",
        applies: heavy_cloud,
        even: LureColor::GoldFlash,
        odd: LureColor::PinkFlash,
    },
    ColorRule {
        name: "morning bite",
        applies: morning_bite,
        even: LureColor::OrangeGold,
        odd: LureColor::HoloZebra,
    },
];

/// Colours when no rule fires.
pub static DEFAULT_COLOR_RULE: ColorRule = ColorRule {
    name: "default",
    applies: always,
    even: LureColor::RedOrange,
    odd: LureColor::Pink,
};

/// Primary colour → backup colour.
pub const COLOR_ROTATION: &[(LureColor, LureColor)] = &[
    (LureColor::Chartreuse, LureColor::OrangeGold),
    (LureColor::OrangeZebra, LureColor::HoloZebra),
    (LureColor::OrangeGold, LureColor::RedOrange),
    (LureColor::HoloZebra, LureColor::RedOrange),
    (LureColor::Cola, LureColor::RedOrange),
    (LureColor::BlackSeaweed, LureColor::Cola),
    (LureColor::RedOrange, LureColor::HoloZebra),
    (LureColor::Pink, LureColor::RedOrange),
    (LureColor::MudGold, LureColor::Chartreuse),
    (LureColor::RedGlow, LureColor::MudGold),
    (LureColor::GreenGold, LureColor::RedOrange),
    (LureColor::SilverGlitter, LureColor::GreenGold),
    (LureColor::DeepRed, LureColor::BlackSeaweed),
    (LureColor::Purple, LureColor::DeepRed),
    (LureColor::GoldFlash, LureColor::OrangeGold),
    (LureColor::PinkFlash, LureColor::GoldFlash),
];

/// Primary shape → backup shape.
pub const SHAPE_ROTATION: &[(SkirtShape, SkirtShape)] = &[
    (SkirtShape::HighWave, SkirtShape::Short),
    (SkirtShape::Short, SkirtShape::Slim),
    (SkirtShape::Slim, SkirtShape::Curly),
    (SkirtShape::LongStraight, SkirtShape::HighWave),
    (SkirtShape::WideFlat, SkirtShape::HighWave),
];

/// Backup for anything missing from the rotation tables.
pub const DEFAULT_BACKUP: Pattern = Pattern {
    color: LureColor::Green,
    shape: SkirtShape::Short,
};

/// Backup colour for `primary`.
pub fn backup_color(primary: LureColor) -> LureColor {
    COLOR_ROTATION
        .iter()
        .find(|(from, _)| *from == primary)
        .map_or(DEFAULT_BACKUP.color, |(_, to)| *to)
}

/// Backup shape for `primary`.
pub fn backup_shape(primary: SkirtShape) -> SkirtShape {
    SHAPE_ROTATION
        .iter()
        .find(|(from, _)| *from == primary)
        .map_or(DEFAULT_BACKUP.shape, |(_, to)| *to)
}

/// Backup pattern for `primary`.
pub fn rotate(primary: Pattern) -> Pattern {
    Pattern {
        color: backup_color(primary.color),
        shape: backup_shape(primary.shape),
    }
}

/// The colour rule that fires for these inputs.
pub fn color_rule(inputs: &StrategyInputs, config: &StrategyConfig) -> &'static ColorRule {
    COLOR_RULES
        .iter()
        .find(|rule| (rule.applies)(inputs, config))
        .unwrap_or(&DEFAULT_COLOR_RULE)
}

/// Skirt shape from rain, season and score.
pub fn select_shape(inputs: &StrategyInputs, config: &StrategyConfig) -> SkirtShape {
    if inputs.rain_mm >= config.heavy_rain_mm {
        SkirtShape::WideFlat
    } else if config.summer_months.contains(&inputs.month)
        && inputs.score >= config.summer_long_score
    {
        SkirtShape::LongStraight
    } else if inputs.score >= HIGH_WAVE_SCORE {
        SkirtShape::HighWave
    } else if inputs.score >= SHORT_SKIRT_SCORE {
        SkirtShape::Short
    } else {
        SkirtShape::Slim
    }
}

/// Retrieve speed and hook size from water temperature and score.
pub fn select_retrieve(temp_c: f64, score: u8) -> (RetrieveSpeed, HookSize) {
    if temp_c <= COLD_RETRIEVE_C || score < DEAD_SLOW_SCORE {
        (RetrieveSpeed::DeadSlow, HookSize::ExtraSmall)
    } else if temp_c >= WARM_RETRIEVE_C && score >= FAST_SCORE {
        (RetrieveSpeed::Fast, HookSize::Large)
    } else if score >= MEDIUM_SCORE {
        (RetrieveSpeed::Medium, HookSize::Medium)
    } else {
        (RetrieveSpeed::Slow, HookSize::Small)
    }
}

/// Full recommendation for one hour.
pub fn select(inputs: &StrategyInputs, config: &StrategyConfig) -> StrategyRecommendation {
    let rule = color_rule(inputs, config);
    let primary = Pattern {
        color: rule.pick(inputs.hour),
        shape: select_shape(inputs, config),
    };
    let (retrieve, hook) = select_retrieve(inputs.temp_c, inputs.score);

    StrategyRecommendation {
        primary,
        secondary: rotate(primary),
        retrieve,
        hook,
        bait_augment: inputs.score < BAIT_SCORE,
        reason: rule.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mid-morning in October with nothing special going on.
    fn plain() -> StrategyInputs {
        StrategyInputs {
            hour: 11,
            sunrise_hour: 6,
            score: 35,
            temp_delta: 0.0,
            month: 10,
            temp_c: 21.0,
            cloud_cover_pct: 40.0,
            rain_mm: 0.0,
        }
    }

    fn cfg() -> StrategyConfig {
        StrategyConfig::default()
    }

    #[test]
    fn test_default_alternates_by_parity() {
        let mut i = plain();
        let odd = select(&i, &cfg());
        assert_eq!(odd.reason, "default");
        assert_eq!(odd.primary.color, LureColor::Pink);

        i.hour = 12;
        let even = select(&i, &cfg());
        assert_eq!(even.primary.color, LureColor::RedOrange);
        assert_eq!(even.secondary.color, LureColor::HoloZebra);
    }

    #[test]
    fn test_rule_precedence() {
        let c = cfg();
        let mut i = plain();
        i.hour = 6;
        i.rain_mm = 2.5;
        i.temp_delta = -0.3;
        assert_eq!(color_rule(&i, &c).name, "heavy rain");

        i.rain_mm = 1.0;
        assert_eq!(color_rule(&i, &c).name, "dawn");

        i.hour = 8;
        assert_eq!(color_rule(&i, &c).name, "cooling water");

        i.temp_delta = 0.0;
        i.month = 4;
        assert_eq!(color_rule(&i, &c).name, "sand-eel season");

        i.month = 1;
        i.temp_c = 11.0;
        i.score = 20;
        assert_eq!(color_rule(&i, &c).name, "winter low activity");

        i.score = 45;
        i.cloud_cover_pct = 85.0;
        assert_eq!(color_rule(&i, &c).name, "heavy cloud");

        i.cloud_cover_pct = 30.0;
        assert_eq!(color_rule(&i, &c).name, "morning bite");

        i.hour = 9;
        assert_eq!(color_rule(&i, &c).name, "default");
    }

    #[test]
    fn test_dawn_colours() {
        let mut i = plain();
        i.hour = 5;
        let rec = select(&i, &cfg());
        assert_eq!(rec.primary.color, LureColor::OrangeZebra);
        assert_eq!(rec.secondary.color, LureColor::HoloZebra);

        i.hour = 6;
        let rec = select(&i, &cfg());
        assert_eq!(rec.primary.color, LureColor::Chartreuse);
        assert_eq!(rec.secondary.color, LureColor::OrangeGold);
    }

    #[test]
    fn test_shapes() {
        let c = cfg();
        let mut i = plain();
        i.score = 29;
        assert_eq!(select_shape(&i, &c), SkirtShape::Slim);
        i.score = 30;
        assert_eq!(select_shape(&i, &c), SkirtShape::Short);
        i.score = 50;
        assert_eq!(select_shape(&i, &c), SkirtShape::HighWave);

        i.month = 7;
        i.score = 70;
        assert_eq!(select_shape(&i, &c), SkirtShape::LongStraight);
        i.score = 69;
        assert_eq!(select_shape(&i, &c), SkirtShape::HighWave);

        i.rain_mm = 2.0;
        assert_eq!(select_shape(&i, &c), SkirtShape::WideFlat);
    }

    #[test]
    fn test_retrieve_and_hook() {
        assert_eq!(
            select_retrieve(22.0, 60),
            (RetrieveSpeed::Fast, HookSize::Large)
        );
        assert_eq!(
            select_retrieve(18.0, 60),
            (RetrieveSpeed::Medium, HookSize::Medium)
        );
        assert_eq!(
            select_retrieve(18.0, 30),
            (RetrieveSpeed::Slow, HookSize::Small)
        );
        assert_eq!(
            select_retrieve(12.0, 90),
            (RetrieveSpeed::DeadSlow, HookSize::ExtraSmall)
        );
        assert_eq!(
            select_retrieve(25.0, 19),
            (RetrieveSpeed::DeadSlow, HookSize::ExtraSmall)
        );
    }

    #[test]
    fn test_winter_threshold_follows_config() {
        let mut i = plain();
        i.month = 1;
        i.temp_c = 11.0;
        i.score = 30;
        assert_eq!(color_rule(&i, &cfg()).name, "winter low activity");

        let c = StrategyConfig {
            winter_score_below: 30,
            ..cfg()
        };
        assert_eq!(color_rule(&i, &c).name, "default");
    }

    #[test]
    fn test_bait_only_at_lowest_band() {
        let mut i = plain();
        i.score = 9;
        assert!(select(&i, &cfg()).bait_augment);
        i.score = 10;
        assert!(!select(&i, &cfg()).bait_augment);
    }

    #[test]
    fn test_rotation_covers_every_primary() {
        let colors = COLOR_RULES
            .iter()
            .chain(std::iter::once(&DEFAULT_COLOR_RULE))
            .flat_map(|rule| [rule.even, rule.odd]);
        for color in colors {
            assert!(
                COLOR_ROTATION.iter().any(|(from, _)| *from == color),
                "no backup for {color}"
            );
        }

        let shapes = [
            SkirtShape::Slim,
            SkirtShape::Short,
            SkirtShape::HighWave,
            SkirtShape::LongStraight,
            SkirtShape::WideFlat,
        ];
        for shape in shapes {
            assert!(
                SHAPE_ROTATION.iter().any(|(from, _)| *from == shape),
                "no backup for {shape}"
            );
        }
    }

    #[test]
    fn test_rotation_default_path() {
        let primary = Pattern {
            color: LureColor::Green,
            shape: SkirtShape::Curly,
        };
        assert_eq!(rotate(primary), DEFAULT_BACKUP);
    }

    #[test]
    fn test_pattern_display() {
        let p = Pattern {
            color: LureColor::BlackSeaweed,
            shape: SkirtShape::HighWave,
        };
        assert_eq!(p.to_string(), "black/seaweed × high-wave");
    }
}
