//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`] for the SmartSafe controller.  The whole
//! [`SafeConfig`] is stored as one postcard blob under a single key.
//!
//! - Validation runs before every write and after every read.
//! - A missing blob yields defaults; a corrupt one is an error the boot
//!   path decides about.
//! - The balance is never written here.

use log::{info, warn};

use crate::app::ports::ConfigPort;
use crate::config::SafeConfig;
use crate::error::ConfigError;

#[cfg(not(target_os = "espidf"))]
use std::collections::HashMap;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use core::ffi::CStr;

const CONFIG_NAMESPACE: &CStr = c"smartsafe";
const CONFIG_KEY: &CStr = c"safecfg";

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
const MAX_BLOB_SIZE: usize = 512;

pub struct NvsConfigStore {
    #[cfg(not(target_os = "espidf"))]
    store: HashMap<String, Vec<u8>>,
}

impl NvsConfigStore {
    /// Initialise NVS flash (erasing it on a layout/version mismatch) and
    /// return the store.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: called once from the main task before any other NVS user.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK || unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsConfigStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsConfigStore: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            store: HashMap::new(),
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn composite_key() -> String {
        format!(
            "{}::{}",
            CONFIG_NAMESPACE.to_string_lossy(),
            CONFIG_KEY.to_string_lossy()
        )
    }

    /// Raw blob access, used by tests to plant damaged data.
    #[cfg(not(target_os = "espidf"))]
    pub fn put_raw(&mut self, bytes: Vec<u8>) {
        self.store.insert(Self::composite_key(), bytes);
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        Ok(self.store.get(&Self::composite_key()).cloned())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&mut self, bytes: Vec<u8>) -> Result<(), ConfigError> {
        self.store.insert(Self::composite_key(), bytes);
        Ok(())
    }

    /// Open the config namespace, run `f` with the handle, close it.
    #[cfg(target_os = "espidf")]
    fn with_handle<T>(
        write: bool,
        f: impl FnOnce(nvs_handle_t) -> Result<T, i32>,
    ) -> Result<T, i32> {
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };
        let mut handle: nvs_handle_t = 0;
        let ret = unsafe { nvs_open(CONFIG_NAMESPACE.as_ptr(), mode, &mut handle) };
        if ret != ESP_OK {
            return Err(ret);
        }
        let result = f(handle);
        unsafe { nvs_close(handle) };
        result
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let result = Self::with_handle(false, |handle| {
            let mut buf = vec![0u8; MAX_BLOB_SIZE];
            let mut size = buf.len();
            let ret = unsafe {
                nvs_get_blob(handle, CONFIG_KEY.as_ptr(), buf.as_mut_ptr().cast(), &mut size)
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            buf.truncate(size);
            Ok(buf)
        });
        match result {
            Ok(bytes) => Ok(Some(bytes)),
            // A fresh partition has no namespace yet either.
            Err(e) if e == ESP_ERR_NVS_NOT_FOUND => Ok(None),
            Err(e) => {
                warn!("NvsConfigStore: NVS read error {e}");
                Err(ConfigError::IoError)
            }
        }
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&mut self, bytes: Vec<u8>) -> Result<(), ConfigError> {
        let result = Self::with_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(handle, CONFIG_KEY.as_ptr(), bytes.as_ptr().cast(), bytes.len())
            };
            if ret != ESP_OK {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK {
                return Err(ret);
            }
            Ok(())
        });
        result.map_err(|e| {
            warn!("NvsConfigStore: NVS write error {e}");
            ConfigError::IoError
        })
    }
}

impl ConfigPort for NvsConfigStore {
    fn load(&self) -> Result<SafeConfig, ConfigError> {
        let Some(bytes) = self.read_blob()? else {
            info!("NvsConfigStore: no stored config, using defaults");
            return Ok(SafeConfig::default());
        };
        let cfg: SafeConfig = postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        info!("NvsConfigStore: loaded config ({} bytes)", bytes.len());
        Ok(cfg)
    }

    fn save(&mut self, config: &SafeConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        if bytes.len() > MAX_BLOB_SIZE {
            return Err(ConfigError::IoError);
        }
        let len = bytes.len();
        self.write_blob(bytes)?;
        info!("NvsConfigStore: config saved ({len} bytes)");
        Ok(())
    }
}
