//! The proxy checker

use crate::config::{CheckerConfig, ConfigurationError, MAX_PROBE_URLS, Validator};
use crate::endpoint::{ProxyDescriptor, TargetDescriptor};
use crate::http::ResponseLimits;
use crate::tls::TlsManager;

use super::attempt::Attempt;
use super::outcome::VerificationResult;

/// Verifies forward proxies.
///
/// Holds only immutable state, so one checker can serve any number of
/// concurrent `verify` calls.
#[derive(Debug, Clone)]
pub struct ProxyChecker {
    config: CheckerConfig,
    probes: Vec<TargetDescriptor>,
    tls: TlsManager,
}

impl ProxyChecker {
    /// Create a checker
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the configuration does not validate,
    /// a probe URL is not a usable http/https URL, or TLS setup fails.
    pub fn new(config: CheckerConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let probes = config
            .probe_urls
            .iter()
            .map(|url| {
                TargetDescriptor::parse(url).map_err(|e| {
                    ConfigurationError::InvalidParameter(format!("probe url '{url}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tls = TlsManager::with_config(&config.tls)?;

        Ok(Self { config, probes, tls })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub(crate) fn tls(&self) -> &TlsManager {
        &self.tls
    }

    pub(crate) fn response_limits(&self) -> ResponseLimits {
        ResponseLimits {
            max_header_bytes: self.config.max_header_bytes,
            max_body_bytes: self.config.max_body_bytes,
            read_timeout: self.config.read_timeout,
        }
    }

    /// Targets tried when the caller supplies none
    pub fn probe_targets(&self) -> &[TargetDescriptor] {
        &self.probes
    }

    /// Verify `proxy` against `url`, or against the probe list when `url` is
    /// absent or blank.
    ///
    /// # Errors
    ///
    /// Only input validation fails here (`InvalidProxy`, `InvalidTarget`,
    /// `UnsupportedScheme`), before any socket is opened. Every network-phase
    /// failure is reported inside the returned result.
    pub async fn verify(&self, proxy: &str, url: Option<&str>) -> crate::Result<VerificationResult> {
        let proxy = ProxyDescriptor::parse(proxy)?;

        let result = match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => {
                let target = TargetDescriptor::parse(url)?;
                self.verify_targets(&proxy, std::slice::from_ref(&target)).await
            }
            None => self.verify_targets(&proxy, &self.probes).await,
        };

        Ok(result)
    }

    /// Try `targets` in order, one fresh connection each, until one works.
    ///
    /// At most the first eight targets are tried. When none works, the last
    /// attempt's failure is returned.
    pub async fn verify_targets(
        &self,
        proxy: &ProxyDescriptor,
        targets: &[TargetDescriptor],
    ) -> VerificationResult {
        let targets = &targets[..targets.len().min(MAX_PROBE_URLS)];
        let mut last = None;

        for (idx, target) in targets.iter().enumerate() {
            let mut attempt = Attempt::new(self, proxy, target);
            let outcome = attempt.run().await;
            let timings = attempt.timeline().timings();

            let result = match outcome {
                Ok(exchange) => VerificationResult::from_exchange(
                    target,
                    &exchange.response,
                    exchange.external_ip,
                    timings,
                ),
                Err(error) => {
                    tracing::debug!(
                        "Probe {}/{} via {} to {} failed in {:?}: {}",
                        idx + 1,
                        targets.len(),
                        proxy,
                        target,
                        attempt.state(),
                        error
                    );
                    VerificationResult::from_error(target, &error, timings)
                }
            };

            if result.working() {
                tracing::info!(
                    "Proxy {} working via {} (status {}, {} ms)",
                    proxy,
                    target,
                    result.status_code(),
                    result.timings().total_ms()
                );
                return result;
            }

            last = Some(result);
        }

        let result = last.unwrap_or_else(VerificationResult::no_targets);
        tracing::info!(
            "Proxy {} failed all {} probe(s): {}",
            proxy,
            targets.len(),
            result.error().unwrap_or(result.note())
        );
        result
    }
}
