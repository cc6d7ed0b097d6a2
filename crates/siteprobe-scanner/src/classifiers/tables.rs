//! Token tables. Row order is scan order.

use super::TokenRule;

/// Bot-challenge providers.
pub const CHALLENGE_PAGE: &[TokenRule] = &[
    TokenRule::sensitive("https://www.google.com/recaptcha/api", "reCAPTCHA"),
    TokenRule::sensitive("captcha", "captcha"),
    TokenRule::sensitive("verifyRecaptchaToken", "reCAPTCHA"),
    TokenRule::sensitive("grecaptcha", "reCAPTCHA"),
    TokenRule::sensitive("www.google.com/recaptcha", "reCAPTCHA"),
];

/// Payment processors and storefront checkouts.
pub const PAYMENT_PROCESSORS: &[TokenRule] = &[
    TokenRule::sensitive("stripe", "Stripe"),
    TokenRule::sensitive("Cybersource", "Cybersource"),
    TokenRule::sensitive("paypal", "Paypal"),
    TokenRule::sensitive("authorize.net", "Authorize.net"),
    TokenRule::sensitive("Bluepay", "Bluepay"),
    TokenRule::sensitive("Magento", "Magento"),
    TokenRule::sensitive("woo", "WooCommerce"),
    TokenRule::sensitive("Shopify", "Shopify"),
    TokenRule::sensitive("adyen", "Adyen"),
    TokenRule::sensitive("Adyen", "Adyen"),
    TokenRule::sensitive("braintree", "Braintree"),
    TokenRule::sensitive("square", "Square"),
    TokenRule::sensitive("payflow", "Payflow"),
];

/// Edge proxies / CDNs.
pub const EDGE_PROXY: &[TokenRule] = &[TokenRule::insensitive("cloudflare", "Cloudflare")];

/// GraphQL schema traces in the page itself.
pub const API_SCHEMA: &[TokenRule] = &[
    TokenRule::insensitive("graphql", "GraphQL"),
    TokenRule::sensitive("query {", "GraphQL"),
    TokenRule::sensitive("mutation {", "GraphQL"),
];

/// Site platforms; first match wins.
pub const PLATFORMS: &[TokenRule] = &[
    TokenRule::insensitive("wordpress", "WordPress"),
    TokenRule::insensitive("shopify", "Shopify"),
];

/// Visible error or stack-trace text.
pub const ERROR_DISCLOSURE: &[TokenRule] = &[
    TokenRule::insensitive("error", "Error logs found"),
    TokenRule::insensitive("exception", "Error logs found"),
];

#[cfg(test)]
pub(crate) const ALL_TABLES: &[&[TokenRule]] = &[
    CHALLENGE_PAGE,
    PAYMENT_PROCESSORS,
    EDGE_PROXY,
    API_SCHEMA,
    PLATFORMS,
    ERROR_DISCLOSURE,
];
