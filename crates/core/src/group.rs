use crate::block::Block;
use crate::layout::Alignment;

/// An ordered run of blocks sharing one anchor in the bar.
#[derive(Debug)]
pub struct Group {
    align: Alignment,
    blocks: Vec<Block>,
}

impl Group {
    pub fn new(align: Alignment, blocks: Vec<Block>) -> Self {
        Self { align, blocks }
    }

    pub fn align(&self) -> Alignment {
        self.align
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Sum of member widths. Widths are fixed, so this is never cached.
    pub fn width(&self) -> i32 {
        self.blocks.iter().map(Block::width).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_sums_members() {
        let g = Group::new(
            Alignment::Right,
            vec![Block::new("battery", 72), Block::new("wifi", 200)],
        );
        assert_eq!(g.width(), 272);
        assert!(!g.is_empty());
        assert_eq!(Group::new(Alignment::Left, Vec::new()).width(), 0);
    }
}
