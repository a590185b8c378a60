//! HTTP API client wrapping `gloo-net` for calls to `<backend>/api/*`.

use std::sync::Arc;

use devicehub_app::config::ClientConfig;
use devicehub_app::ports::{ApiError, DeviceHubApi, OtaReceipt};
use devicehub_domain::device::{Device, NewDevice};
use devicehub_domain::device_type::{DeviceType, NewDeviceType};
use devicehub_domain::firmware::{
    FirmwareDownload, FirmwareUpload, FirmwareVersion, UploadReceipt,
};
use devicehub_domain::id::{DeviceId, DeviceTypeId, FirmwareId};
use devicehub_domain::pin::PinCommand;
use devicehub_domain::sensor::SensorReading;
use devicehub_domain::session::{AuthRequest, Session};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

/// JSON error body returned by the server on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

fn js_error(err: &JsValue) -> ApiError {
    ApiError::Transport(format!("{err:?}"))
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let detail = match resp.json::<ErrorBody>().await {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => Some(detail),
        _ => None,
    };
    Err(ApiError::http(resp.status(), detail))
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    check_response(builder.send().await.map_err(transport)?).await
}

async fn send_request(request: Result<Request, gloo_net::Error>) -> Result<Response, ApiError> {
    check_response(request.map_err(transport)?.send().await.map_err(transport)?).await
}

async fn read<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json().await.map_err(transport)
}

/// REST client bound to one backend and, once logged in, one session token.
#[derive(Clone)]
pub struct HttpApi {
    config: Arc<ClientConfig>,
    token: Option<Arc<str>>,
}

impl HttpApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
            token: None,
        }
    }

    /// A client that authenticates every call with `token`.
    #[must_use]
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            config: Arc::clone(&self.config),
            token: Some(Arc::from(token)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.api_url(path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::get(&self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(Request::post(&self.url(path)))
    }
}

fn multipart(upload: &FirmwareUpload<File>) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(|err| js_error(&err))?;
    form.append_with_str("device_type_id", upload.device_type_id.as_str())
        .map_err(|err| js_error(&err))?;
    form.append_with_str("version", &upload.version)
        .map_err(|err| js_error(&err))?;
    if let Some(description) = &upload.description {
        form.append_with_str("description", description)
            .map_err(|err| js_error(&err))?;
    }
    form.append_with_blob_and_filename("file", &upload.file, &upload.file.name())
        .map_err(|err| js_error(&err))?;
    Ok(form)
}

impl DeviceHubApi for HttpApi {
    type File = File;

    async fn authenticate(&self, request: &AuthRequest) -> Result<Session, ApiError> {
        let builder = Request::post(&self.url(request.mode().path()));
        read(send_request(builder.json(request)).await?).await
    }

    async fn list_devices(&self) -> Result<Vec<Device>, ApiError> {
        read(send(self.get("/devices")).await?).await
    }

    async fn create_device(&self, device: &NewDevice) -> Result<Device, ApiError> {
        read(send_request(self.post("/devices").json(device)).await?).await
    }

    async fn delete_device(&self, id: &DeviceId) -> Result<(), ApiError> {
        let url = self.url(&format!("/devices/{id}"));
        send(self.authorize(Request::delete(&url))).await?;
        Ok(())
    }

    async fn list_device_types(&self) -> Result<Vec<DeviceType>, ApiError> {
        read(send(self.get("/device-types")).await?).await
    }

    async fn create_device_type(
        &self,
        device_type: &NewDeviceType,
    ) -> Result<DeviceType, ApiError> {
        read(send_request(self.post("/device-types").json(device_type)).await?).await
    }

    async fn list_firmware(
        &self,
        device_type_id: &DeviceTypeId,
    ) -> Result<Vec<FirmwareVersion>, ApiError> {
        read(send(self.get(&format!("/firmware/{device_type_id}"))).await?).await
    }

    async fn upload_firmware(
        &self,
        upload: FirmwareUpload<File>,
    ) -> Result<UploadReceipt, ApiError> {
        let form = multipart(&upload)?;
        read(send_request(self.post("/firmware/upload").body(form)).await?).await
    }

    async fn download_firmware(
        &self,
        firmware_id: &FirmwareId,
    ) -> Result<FirmwareDownload, ApiError> {
        read(send(self.get(&format!("/firmware/download/{firmware_id}"))).await?).await
    }

    async fn push_firmware(
        &self,
        device_id: &DeviceId,
        firmware_id: &FirmwareId,
    ) -> Result<OtaReceipt, ApiError> {
        let path = format!("/firmware/ota/{device_id}/{firmware_id}");
        read(send(self.post(&path)).await?).await
    }

    async fn control_pin(&self, command: &PinCommand) -> Result<(), ApiError> {
        send_request(self.post("/control/pin").json(command)).await?;
        Ok(())
    }

    async fn sensor_history(
        &self,
        device_id: &DeviceId,
        limit: usize,
    ) -> Result<Vec<SensorReading>, ApiError> {
        read(send(self.get(&format!("/sensor-data/{device_id}?limit={limit}"))).await?).await
    }
}
