use wasm_bindgen_futures::JsFuture;
use web_sys::js_sys::{Array, Promise};
use web_sys::HtmlImageElement;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Starts loading `src` into `image`; the promise settles on load or error.
fn load_into(image: &HtmlImageElement, src: &str) -> Promise {
    let loaded = Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(src);
    loaded
}

pub async fn preload(src: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    JsFuture::from(load_into(&image, src)).await?;
    Ok(image)
}

/// Loads every source in parallel. Fails if any of them fails.
pub async fn preload_multiple(sources: &[&str]) -> Result<Vec<HtmlImageElement>> {
    let images = sources
        .iter()
        .map(|_| HtmlImageElement::new())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let pending: Array = images.iter().zip(sources).map(|(image, src)| load_into(image, src)).collect();
    JsFuture::from(Promise::all(&pending)).await?;
    Ok(images)
}

pub async fn image_dimensions(src: &str) -> Result<ImageSize> {
    let image = preload(src).await?;
    Ok(ImageSize { width: image.natural_width(), height: image.natural_height() })
}
