use serde::{Deserialize, Serialize};

use super::collection::{CollectionItem, InputKind, ListConfig};

/// Longest side of a rendered image, in pixels.
pub const MAX_IMAGE_SIDE: u32 = 200;

/// An image entry. `url`, `w` and `h` come from the server; the display
/// pair is derived with [`fit_display`](Image::fit_display) before the
/// entry is appended, so the shell never sizes images itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    pub id: u32,
    pub url: String,
    /// Natural width in pixels.
    pub w: u32,
    /// Natural height in pixels.
    pub h: u32,
    #[serde(default)]
    pub display_w: u32,
    #[serde(default)]
    pub display_h: u32,
}

impl CollectionItem for Image {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Image {
    /// Configuration of the image list nested under one album.
    pub fn list_config(album_id: u32) -> ListConfig {
        ListConfig {
            list_endpoint: format!("/albums/{album_id}/images"),
            item_endpoint: "/images".to_string(),
            input: InputKind::File,
            create_label: "Upload Image".to_string(),
            create_permission: "post:images".to_string(),
            delete_permission: "delete:images".to_string(),
            rename_permission: None,
            header_text: String::new(),
            empty_message: "No images found".to_string(),
        }
    }

    /// Scale the natural size so the longer side equals [`MAX_IMAGE_SIDE`],
    /// preserving aspect ratio.
    pub fn fit_display(&mut self) {
        let (w, h) = display_size(self.w, self.h);
        self.display_w = w;
        self.display_h = h;
    }
}

/// Display size for a natural `(w, h)` with the longer side scaled to
/// [`MAX_IMAGE_SIDE`]. Degenerate sizes stay zero.
pub fn display_size(w: u32, h: u32) -> (u32, u32) {
    let longest = w.max(h);
    if longest == 0 {
        return (0, 0);
    }
    let scale = f64::from(MAX_IMAGE_SIDE) / f64::from(longest);
    (
        (f64::from(w) * scale).round() as u32,
        (f64::from(h) * scale).round() as u32,
    )
}
