use log::{info, warn};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{js_sys, Element, HtmlFormElement};

use crate::config;
use crate::contact::BotCheck;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = emailjs, js_name = init, catch)]
    fn emailjs_init(public_key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = emailjs, js_name = sendForm, catch)]
    fn emailjs_send_form(
        service_id: &str,
        template_id: &str,
        form: &HtmlFormElement,
    ) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(js_namespace = grecaptcha, js_name = getResponse, catch)]
    fn grecaptcha_get_response() -> Result<String, JsValue>;

    #[wasm_bindgen(js_namespace = grecaptcha, js_name = reset, catch)]
    fn grecaptcha_reset() -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = grecaptcha, js_name = ready, catch)]
    fn grecaptcha_ready(callback: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = grecaptcha, js_name = render, catch)]
    fn grecaptcha_render(container: &Element, params: &JsValue) -> Result<JsValue, JsValue>;
}

/// True when `window[name]` exists; scripts that failed to load leave it undefined.
fn global_defined(name: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    js_sys::Reflect::get(&window, &JsValue::from_str(name))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

/// Renders a rejected JS value for the console without assuming its shape.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// The hosted email-delivery client (`window.emailjs`).
#[derive(Clone, Debug)]
pub struct EmailJs {
    service_id: &'static str,
    template_id: &'static str,
}

impl EmailJs {
    pub fn detect() -> Option<Self> {
        if !global_defined("emailjs") {
            return None;
        }
        match config::get_emailjs_public_key() {
            Some(key) => {
                if let Err(e) = emailjs_init(key) {
                    warn!("emailjs.init failed: {}", describe_js_error(&e));
                }
            }
            None => warn!("EMAILJS_PUBLIC_KEY was not set at build time, relying on the page to call emailjs.init"),
        }
        info!("emailjs detected");
        Some(Self {
            service_id: config::get_email_service_id(),
            template_id: config::get_email_template_id(),
        })
    }

    /// Sends the form's current field values through the configured service and template.
    pub async fn send_form(&self, form: &HtmlFormElement) -> Result<(), String> {
        let promise = emailjs_send_form(self.service_id, self.template_id, form)
            .map_err(|e| describe_js_error(&e))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| describe_js_error(&e))
    }
}

#[derive(Serialize)]
struct RenderParams<'a> {
    sitekey: &'a str,
}

/// The bot-check widget (`window.grecaptcha`).
#[derive(Clone, Copy, Debug)]
pub struct Recaptcha {
    site_key: &'static str,
}

impl Recaptcha {
    pub fn detect() -> Option<Self> {
        let site_key = config::get_recaptcha_site_key()?;
        if !global_defined("grecaptcha") {
            return None;
        }
        Some(Self { site_key })
    }

    /// Renders the widget into `container` once the widget script is ready.
    /// `on_solved` runs every time a token becomes available.
    pub fn render(&self, container: Element, on_solved: impl Fn() + 'static) {
        let site_key = self.site_key;
        let on_ready = Closure::once_into_js(move || {
            let params = match serde_wasm_bindgen::to_value(&RenderParams { sitekey: site_key }) {
                Ok(params) => params,
                Err(e) => {
                    warn!("Could not build reCAPTCHA params: {}", e);
                    return;
                }
            };
            let callback = Closure::<dyn Fn()>::new(on_solved).into_js_value();
            let _ = js_sys::Reflect::set(&params, &JsValue::from_str("callback"), &callback);
            if let Err(e) = grecaptcha_render(&container, &params) {
                warn!("grecaptcha.render failed: {}", describe_js_error(&e));
            }
        });
        if let Err(e) = grecaptcha_ready(&on_ready) {
            warn!("grecaptcha.ready failed: {}", describe_js_error(&e));
        }
    }
}

impl BotCheck for Recaptcha {
    fn response(&self) -> String {
        grecaptcha_get_response().unwrap_or_default()
    }

    fn reset(&self) {
        if let Err(e) = grecaptcha_reset() {
            warn!("grecaptcha.reset failed: {}", describe_js_error(&e));
        }
    }
}
