//! Disclaimer text shown next to the listing results

pub const DISCLAIMER_TITLE: &str = "Disclaimer";

pub const DISCLAIMER_BODY: &str = "This website is for informational purposes only. \
All listings are provided by third parties. We do not guarantee the accuracy, reliability, \
or quality of services listed. Users are encouraged to verify details directly with the \
service providers. External links such as Google Maps or WhatsApp are provided for \
convenience. We do not endorse or take responsibility for the content of external websites.";
