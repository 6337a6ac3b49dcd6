/// Errors raised while turning markdown text into nodes.
///
/// Every variant is fatal for the document being converted: the converter
/// stops at the first one and returns it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkdownError {
    #[error("invalid markdown, formatted section not closed (unmatched `{delimiter}`)")]
    UnclosedDelimiter { delimiter: String },

    #[error("invalid markdown, image section not closed or mismatched")]
    MalformedImage,

    #[error("invalid markdown, stray '!' or malformed image syntax")]
    StrayImageBang,

    #[error("invalid markdown, image section not closed")]
    UnclosedImage,

    #[error("invalid markdown, link section not closed or mismatched")]
    MalformedLink,

    #[error("invalid markdown, link section not closed")]
    UnclosedLink,

    #[error("invalid markdown, no h1 heading found")]
    MissingTitle,
}

/// Errors raised while serializing an `HtmlNode` tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("parent node has no tag")]
    MissingTag,

    #[error("leaf node has an empty tag; use no tag for raw text")]
    EmptyLeafTag,
}

/// Any error produced by the markdown → HTML string pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Markdown(#[from] MarkdownError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
