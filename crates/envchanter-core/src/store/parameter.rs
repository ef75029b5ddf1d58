//! Path-addressed parameter store backed by AWS SSM Parameter Store

use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use envchanter_meta::{Backend, StoreOptions};
use tokio::runtime::Runtime;

use super::{SecretStore, StoreError, StoreResult, load_sdk_config, sdk_runtime};

/// SSM Parameter Store client.
///
/// Values are read with decryption and written as `SecureString`,
/// overwriting any existing version.
pub struct ParameterStore {
    client: Client,
    runtime: Runtime,
}

impl ParameterStore {
    pub fn connect(options: &StoreOptions) -> StoreResult<Self> {
        let runtime = sdk_runtime()?;
        let config = runtime.block_on(load_sdk_config(options));
        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }
}

impl SecretStore for ParameterStore {
    fn backend(&self) -> Backend {
        Backend::ParameterStore
    }

    fn fetch(&self, identifier: &str) -> StoreResult<Option<String>> {
        let result = self.runtime.block_on(
            self.client
                .get_parameter()
                .name(identifier)
                .with_decryption(true)
                .send(),
        );

        match result {
            Ok(output) => Ok(output
                .parameter()
                .and_then(|p| p.value())
                .map(str::to_string)),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_parameter_not_found())
                {
                    return Ok(None);
                }
                Err(StoreError::backend(DisplayErrorContext(&err), identifier))
            }
        }
    }

    fn store(&self, identifier: &str, value: &str) -> StoreResult<()> {
        self.runtime
            .block_on(
                self.client
                    .put_parameter()
                    .name(identifier)
                    .value(value)
                    .r#type(ParameterType::SecureString)
                    .overwrite(true)
                    .send(),
            )
            .map_err(|err| StoreError::backend(DisplayErrorContext(&err), identifier))?;
        Ok(())
    }
}
