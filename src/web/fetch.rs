//! Scene data over `fetch`, and sprite sheet image loading.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, HtmlImageElement, Request, RequestInit, Response};

use crate::error::{Result, SpriteTabError};
use crate::scene::{parse_find_scene_response, GraphqlRequest, SceneDataProvider, SceneMedia};

/// Posts the `findScene` query to the host's GraphQL endpoint.
pub struct GraphqlSceneProvider {
    endpoint: String,
}

impl GraphqlSceneProvider {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
        }
    }
}

fn fetch_err(e: &JsValue) -> SpriteTabError {
    let detail = e.as_string().unwrap_or_else(|| format!("{e:?}"));
    SpriteTabError::SceneFetch(detail)
}

impl SceneDataProvider for GraphqlSceneProvider {
    async fn fetch_scene(&self, scene_id: &str) -> Result<SceneMedia> {
        let body = GraphqlRequest::find_scene(scene_id).to_json()?;

        let headers = Headers::new().map_err(|e| fetch_err(&e))?;
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| fetch_err(&e))?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&body));
        let request =
            Request::new_with_str_and_init(&self.endpoint, &init).map_err(|e| fetch_err(&e))?;

        let window =
            web_sys::window().ok_or_else(|| SpriteTabError::SceneFetch("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| fetch_err(&e))?
            .dyn_into()
            .map_err(|e| fetch_err(&e))?;
        if !response.ok() {
            return Err(SpriteTabError::SceneFetch(format!(
                "HTTP {}",
                response.status()
            )));
        }
        let text = JsFuture::from(response.text().map_err(|e| fetch_err(&e))?)
            .await
            .map_err(|e| fetch_err(&e))?
            .as_string()
            .unwrap_or_default();
        parse_find_scene_response(&text)
    }
}

/// Load an image and resolve with its natural pixel size.
///
/// Both handlers are dropped once the load settles, so nothing outlives the
/// returned future.
pub async fn load_image_size(url: &str) -> Result<(f64, f64)> {
    let img = Rc::new(
        HtmlImageElement::new().map_err(|e| SpriteTabError::from_js("create image", &e))?,
    );
    let mut handlers: Vec<Closure<dyn FnMut()>> = Vec::with_capacity(2);
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let img_onload = Rc::clone(&img);
        let onload = Closure::once(move || {
            let size = js_sys::Array::new();
            size.push(&JsValue::from_f64(f64::from(img_onload.natural_width())));
            size.push(&JsValue::from_f64(f64::from(img_onload.natural_height())));
            let _ = resolve.call1(&JsValue::NULL, &size);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_load_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        handlers.push(onload);
        handlers.push(onerror);
    });
    img.set_src(url);
    let settled = JsFuture::from(promise).await;
    img.set_onload(None);
    img.set_onerror(None);
    drop(handlers);

    let value =
        settled.map_err(|e| SpriteTabError::ImageLoad(e.as_string().unwrap_or_default()))?;
    let size = js_sys::Array::from(&value);
    let width = size.get(0).as_f64().unwrap_or(0.0);
    let height = size.get(1).as_f64().unwrap_or(0.0);
    Ok((width, height))
}
