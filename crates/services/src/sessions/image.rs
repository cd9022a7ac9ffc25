use std::path::{Path, PathBuf};

use quiz_core::Question;

/// Shown when a question has no usable image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "Images/QuestionMark.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    File(PathBuf),
    Placeholder(&'static str),
}

impl ImageSource {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ImageSource::File(path) => path,
            ImageSource::Placeholder(path) => Path::new(path),
        }
    }

    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ImageSource::Placeholder(_))
    }
}

/// Resolves the image to display for `question`, checking the filesystem.
#[must_use]
pub fn resolve_image(question: &Question) -> ImageSource {
    resolve_image_with(question, Path::is_file)
}

/// Resolves the image with a caller-supplied existence check.
///
/// An empty path, or one `exists` rejects, falls back to
/// [`DEFAULT_PLACEHOLDER_IMAGE`].
pub fn resolve_image_with(question: &Question, exists: impl Fn(&Path) -> bool) -> ImageSource {
    let raw = question.image_path();
    if raw.is_empty() {
        return ImageSource::Placeholder(DEFAULT_PLACEHOLDER_IMAGE);
    }
    let path = Path::new(raw);
    if exists(path) {
        ImageSource::File(path.to_path_buf())
    } else {
        ImageSource::Placeholder(DEFAULT_PLACEHOLDER_IMAGE)
    }
}
