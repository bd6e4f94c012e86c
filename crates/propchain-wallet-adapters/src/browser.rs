//! `window.ethereum` bindings.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use propchain_wallet_core::{AccountsListener, ProviderError, RpcMethod, Subscription};

const ACCOUNTS_CHANGED: &str = "accountsChanged";

#[derive(Debug, Clone)]
pub struct BrowserProvider {
    provider: JsValue,
}

impl BrowserProvider {
    /// Looks up `window.ethereum`. Extensions may replace the object at any
    /// time, so this is re-run for every operation.
    pub fn locate() -> Option<Self> {
        let window = web_sys::window()?;
        let provider = get_prop(&window.into(), "ethereum").ok()?;
        if provider.is_null() || provider.is_undefined() {
            return None;
        }
        Some(Self { provider })
    }

    pub async fn request(&self, method: &RpcMethod) -> Result<Value, ProviderError> {
        let request_fn = self
            .function("request")
            .ok_or_else(|| ProviderError::message("window.ethereum.request is unavailable"))?;

        let request_js = method
            .to_request()
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderError::message(format!("failed to encode request: {e}")))?;
        let promise = request_fn
            .call1(&self.provider, &request_js)
            .map_err(decode_js_error)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| ProviderError::message("provider request did not return a Promise"))?;
        let result = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(decode_js_error)?;
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::message(format!("failed to decode response: {e}")))
    }

    pub fn subscribe(&self, mut listener: AccountsListener) -> Result<Subscription, ProviderError> {
        let on_fn = self
            .function("on")
            .or_else(|| self.function("addListener"))
            .ok_or_else(|| ProviderError::message("provider does not expose on/addListener"))?;
        let remove_fn = self
            .function("removeListener")
            .or_else(|| self.function("off"));

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
            listener(js_accounts(&value));
        });
        on_fn
            .call2(
                &self.provider,
                &JsValue::from_str(ACCOUNTS_CHANGED),
                callback.as_ref().unchecked_ref(),
            )
            .map_err(decode_js_error)?;

        let provider = self.provider.clone();
        Ok(Subscription::new(move || {
            if let Some(remove) = remove_fn {
                if let Err(e) = remove.call2(
                    &provider,
                    &JsValue::from_str(ACCOUNTS_CHANGED),
                    callback.as_ref().unchecked_ref(),
                ) {
                    tracing::warn!(error = ?e, "removeListener(accountsChanged) failed");
                }
            }
            drop(callback);
        }))
    }

    fn function(&self, name: &str) -> Option<js_sys::Function> {
        get_prop(&self.provider, name)
            .ok()
            .and_then(|v| v.dyn_into::<js_sys::Function>().ok())
    }
}

fn js_accounts(value: &JsValue) -> Vec<String> {
    if !js_sys::Array::is_array(value) {
        return Vec::new();
    }
    js_sys::Array::from(value)
        .iter()
        .filter_map(|item| item.as_string())
        .collect()
}

/// Rejections are usually `{ code, message }` objects, sometimes plain
/// `Error`s or strings.
fn decode_js_error(err: JsValue) -> ProviderError {
    if let Some(message) = err.as_string() {
        return ProviderError::message(message);
    }
    let code = get_prop(&err, "code")
        .ok()
        .and_then(|v| v.as_f64())
        .map(|c| c as i64);
    let message = get_prop(&err, "message").ok().and_then(|v| v.as_string());
    ProviderError::new(code, message)
}

fn get_prop(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
}
