use serde::{Serialize, Serializer};

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum InlineSpan {
    #[serde(rename = "plain")]
    PlainText(String),
    Emphasized(String),
}

impl InlineSpan {
    /// The literal text of the span, without any delimiters.
    pub fn text(&self) -> &str {
        match self {
            InlineSpan::PlainText(text) | InlineSpan::Emphasized(text) => text,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, InlineSpan::Emphasized(_))
    }
}

/// Heading depth. Only `##` and `###` headings are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H2,
    H3,
}

impl HeadingLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Block-level elements parsed from reply text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: HeadingLevel,
        text: Vec<InlineSpan>,
    },
    /// Header cells stay literal; data cells are formatted.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Vec<InlineSpan>>>,
    },
    UnorderedList {
        items: Vec<Vec<InlineSpan>>,
    },
    /// Source numbering is not kept: items display as 1, 2, 3 in order.
    OrderedList {
        items: Vec<Vec<InlineSpan>>,
    },
    Paragraph {
        text: Vec<InlineSpan>,
    },
}

/// An ordered, immutable sequence of blocks produced from one reply text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

impl IntoIterator for Document {
    type Item = Block;
    type IntoIter = std::vec::IntoIter<Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}
