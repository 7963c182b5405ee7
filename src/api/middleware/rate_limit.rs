//! Rate limiting middleware using token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

type IpGovernorLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// `replenish_secs` is the interval after which one request of the quota
/// is replenished.
fn governor_layer(replenish_secs: u64, burst_size: u32) -> IpGovernorLayer {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(replenish_secs)
            .burst_size(burst_size)
            .finish()
            .expect("rate limit period and burst size are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for authenticated API endpoints.
///
/// # Limits
///
/// - **Rate**: one request replenished every 2 seconds
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`. Limits are
/// applied per client IP taken from the socket peer address, so the router
/// must be served with `into_make_service_with_connect_info`.
pub fn layer() -> IpGovernorLayer {
    governor_layer(2, 100)
}

/// Stricter limiter for login and registration.
///
/// # Limits
///
/// - **Rate**: one request replenished every 6 seconds
/// - **Burst**: 10 requests
pub fn login_layer() -> IpGovernorLayer {
    governor_layer(6, 10)
}
