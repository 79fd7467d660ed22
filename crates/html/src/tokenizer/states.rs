//! Tokenizer states and the fixed byte sequences matched in raw regions.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    Text,
    BeforeTagName,
    InTagName,
    InSelfClosingTag,
    BeforeClosingTagName,
    InClosingTagName,
    AfterClosingTagName,

    BeforeAttributeName,
    InAttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    InAttributeValueDq,
    InAttributeValueSq,
    InAttributeValueNq,

    BeforeDeclaration,
    InDeclaration,
    InProcessingInstruction,
    BeforeComment,
    CDataSequence,
    InSpecialComment,
    InCommentLike,

    BeforeSpecialS,
    BeforeSpecialT,
    SpecialStartSequence,
    InSpecialTag,

    InEntity,
}

impl State {
    /// States inside an open or close tag. Input ending here drops the tag.
    pub(crate) fn is_inside_tag(self) -> bool {
        matches!(
            self,
            State::InTagName
                | State::BeforeAttributeName
                | State::BeforeAttributeValue
                | State::AfterAttributeName
                | State::InAttributeName
                | State::InAttributeValueSq
                | State::InAttributeValueDq
                | State::InAttributeValueNq
                | State::InClosingTagName
        )
    }

    pub(crate) fn is_attribute_value(self) -> bool {
        matches!(
            self,
            State::InAttributeValueDq | State::InAttributeValueSq | State::InAttributeValueNq
        )
    }
}

/// Byte sequences matched one byte at a time with a shared index. Tag-name
/// sequences are stored lowercase and compared against `byte | 0x20`.
pub(crate) mod seq {
    pub(crate) const CDATA: &[u8] = b"CDATA[";
    pub(crate) const CDATA_END: &[u8] = b"]]>";
    pub(crate) const COMMENT_END: &[u8] = b"-->";
    pub(crate) const SCRIPT_END: &[u8] = b"</script";
    pub(crate) const STYLE_END: &[u8] = b"</style";
    pub(crate) const TITLE_END: &[u8] = b"</title";
    pub(crate) const TEXTAREA_END: &[u8] = b"</textarea";
}

/// Which fixed sequence the tokenizer is currently matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Sequence {
    CDataEnd,
    CommentEnd,
    ScriptEnd,
    StyleEnd,
    TitleEnd,
    TextareaEnd,
}

impl Sequence {
    pub(crate) fn bytes(self) -> &'static [u8] {
        match self {
            Sequence::CDataEnd => seq::CDATA_END,
            Sequence::CommentEnd => seq::COMMENT_END,
            Sequence::ScriptEnd => seq::SCRIPT_END,
            Sequence::StyleEnd => seq::STYLE_END,
            Sequence::TitleEnd => seq::TITLE_END,
            Sequence::TextareaEnd => seq::TEXTAREA_END,
        }
    }

    /// Raw-text elements whose content still decodes references.
    pub(crate) fn decodes_entities(self) -> bool {
        matches!(self, Sequence::TitleEnd | Sequence::TextareaEnd)
    }
}
