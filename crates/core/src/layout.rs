//! Horizontal layout of groups and blocks.
//!
//! [`place`] is the only place offsets are computed; painting and hit-testing
//! both walk its output so drawn and clickable geometry cannot drift apart.

use crate::block::Block;
use crate::error::{BarError, Result};
use crate::group::Group;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Anchor of a group within the bar, and of text within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[serde(alias = "l")]
    Left,
    #[default]
    #[serde(alias = "c")]
    Center,
    #[serde(alias = "r")]
    Right,
}

impl FromStr for Alignment {
    type Err = BarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(Self::Left),
            "c" | "center" | "centre" => Ok(Self::Center),
            "r" | "right" => Ok(Self::Right),
            other => Err(BarError::Config(format!("not a valid alignment: '{other}'"))),
        }
    }
}

/// X coordinate where a group of `group_width` pixels starts.
pub fn group_origin(bar_width: i32, align: Alignment, group_width: i32) -> i32 {
    match align {
        Alignment::Left => 0,
        Alignment::Center => bar_width / 2 - group_width / 2,
        Alignment::Right => bar_width - group_width,
    }
}

/// A block together with its absolute x offset.
#[derive(Debug, Clone, Copy)]
pub struct Placement<'a> {
    pub x: i32,
    pub block: &'a Block,
}

impl Placement<'_> {
    /// One past the last pixel of the block.
    pub fn end(&self) -> i32 {
        self.x + self.block.width()
    }

    pub fn contains(&self, x: i32) -> bool {
        x >= self.x && x < self.end()
    }
}

/// Every block in display order with its offset.
pub fn place(bar_width: i32, groups: &[Group]) -> impl Iterator<Item = Placement<'_>> + '_ {
    groups.iter().flat_map(move |group| {
        let origin = group_origin(bar_width, group.align(), group.width());
        group.blocks().iter().scan(origin, |x, block| {
            let placement = Placement { x: *x, block };
            *x += block.width();
            Some(placement)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(align: Alignment, widths: &[i32]) -> Group {
        Group::new(
            align,
            widths
                .iter()
                .enumerate()
                .map(|(i, w)| Block::new(format!("b{i}"), *w))
                .collect(),
        )
    }

    fn offsets(bar_width: i32, groups: &[Group]) -> Vec<i32> {
        place(bar_width, groups).map(|p| p.x).collect()
    }

    #[test]
    fn origins_follow_alignment() {
        assert_eq!(group_origin(1920, Alignment::Left, 300), 0);
        assert_eq!(group_origin(1920, Alignment::Center, 400), 760);
        assert_eq!(group_origin(1920, Alignment::Right, 272), 1648);
    }

    #[test]
    fn center_uses_integer_halves() {
        // 1921/2 = 960, 401/2 = 200
        assert_eq!(group_origin(1921, Alignment::Center, 401), 760);
        // 1920/2 = 960, 401/2 = 200
        assert_eq!(group_origin(1920, Alignment::Center, 401), 760);
        assert_eq!(group_origin(1920, Alignment::Center, 399), 761);
    }

    #[test]
    fn right_group_scenario() {
        let groups = vec![group(Alignment::Right, &[72, 200])];
        assert_eq!(offsets(1920, &groups), vec![1648, 1720]);
    }

    #[test]
    fn siblings_are_contiguous() {
        let groups = vec![group(Alignment::Left, &[32, 48, 32, 340])];
        let placed: Vec<_> = place(1920, &groups).collect();
        for pair in placed.windows(2) {
            assert_eq!(pair[0].end(), pair[1].x);
        }
        assert_eq!(placed[0].x, 0);
    }

    #[test]
    fn groups_in_display_order() {
        let groups = vec![
            group(Alignment::Left, &[100, 50]),
            group(Alignment::Center, &[400]),
            group(Alignment::Right, &[72, 200]),
        ];
        assert_eq!(offsets(1920, &groups), vec![0, 100, 760, 1648, 1720]);
    }

    #[test]
    fn placement_interval_is_half_open() {
        let groups = vec![group(Alignment::Left, &[100])];
        let p = place(1920, &groups).next().unwrap();
        assert!(p.contains(0));
        assert!(p.contains(99));
        assert!(!p.contains(100));
        assert!(!p.contains(-1));
    }

    #[test]
    fn alignment_parses_short_and_long_names() {
        assert_eq!("l".parse::<Alignment>().unwrap(), Alignment::Left);
        assert_eq!("Center".parse::<Alignment>().unwrap(), Alignment::Center);
        assert_eq!("r".parse::<Alignment>().unwrap(), Alignment::Right);
        assert!(matches!(
            "absolute".parse::<Alignment>(),
            Err(BarError::Config(_))
        ));
    }
}
