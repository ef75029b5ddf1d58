//! Name-addressed secret vault backed by AWS Secrets Manager

use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use envchanter_meta::{Backend, StoreOptions};
use tokio::runtime::Runtime;

use super::{SecretStore, StoreError, StoreResult, load_sdk_config, sdk_runtime};

/// Secrets Manager client.
///
/// Only string secrets are supported. Storing to a name that does not exist
/// yet creates the secret.
pub struct SecretVault {
    client: Client,
    runtime: Runtime,
}

impl SecretVault {
    pub fn connect(options: &StoreOptions) -> StoreResult<Self> {
        let runtime = sdk_runtime()?;
        let config = runtime.block_on(load_sdk_config(options));
        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }

    fn create(&self, identifier: &str, value: &str) -> StoreResult<()> {
        tracing::debug!("secret does not exist yet, creating it");
        self.runtime
            .block_on(
                self.client
                    .create_secret()
                    .name(identifier)
                    .secret_string(value)
                    .send(),
            )
            .map_err(|err| StoreError::backend(DisplayErrorContext(&err), identifier))?;
        Ok(())
    }
}

impl SecretStore for SecretVault {
    fn backend(&self) -> Backend {
        Backend::SecretVault
    }

    fn fetch(&self, identifier: &str) -> StoreResult<Option<String>> {
        let result = self
            .runtime
            .block_on(self.client.get_secret_value().secret_id(identifier).send());

        match result {
            Ok(output) => match output.secret_string() {
                Some(value) => Ok(Some(value.to_string())),
                None if output.secret_binary().is_some() => Err(StoreError::backend(
                    "secret holds binary data, only string secrets are supported",
                    identifier,
                )),
                None => Ok(None),
            },
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    return Ok(None);
                }
                Err(StoreError::backend(DisplayErrorContext(&err), identifier))
            }
        }
    }

    fn store(&self, identifier: &str, value: &str) -> StoreResult<()> {
        let result = self.runtime.block_on(
            self.client
                .put_secret_value()
                .secret_id(identifier)
                .secret_string(value)
                .send(),
        );

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                self.create(identifier, value)
            }
            Err(err) => Err(StoreError::backend(DisplayErrorContext(&err), identifier)),
        }
    }
}
