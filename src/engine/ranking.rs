use crate::entities::Quote;

pub const PRICE_WEIGHT: f64 = 0.7;
pub const ETA_WEIGHT: f64 = 0.3;

/// Scores every quote against the cheapest price and the shortest ETA and
/// orders them best first. Equal scores keep their input order.
///
/// When either minimum is zero the ratios are undefined; scores are then
/// zeroed and the quotes are ordered by ascending price instead.
pub fn rank(mut quotes: Vec<Quote>) -> Vec<Quote> {
    let min_price = quotes.iter().map(|quote| quote.price_amount).min();
    let min_eta = quotes.iter().map(|quote| quote.eta_minutes).min();

    let (min_price, min_eta) = match (min_price, min_eta) {
        (Some(price), Some(eta)) if price > 0 && eta > 0 => (price as f64, f64::from(eta)),
        (None, _) | (_, None) => return quotes,
        _ => {
            tracing::warn!("zero price or eta in quote list, ordering by price");
            quotes.iter_mut().for_each(|quote| quote.rank_score = 0.0);
            quotes.sort_by_key(|quote| quote.price_amount);
            return quotes;
        }
    };

    for quote in quotes.iter_mut() {
        let price_norm = quote.price_amount as f64 / min_price;
        let eta_norm = f64::from(quote.eta_minutes) / min_eta;
        quote.rank_score = PRICE_WEIGHT * price_norm + ETA_WEIGHT * eta_norm;
    }

    sort_by_score(quotes)
}

/// Stable ascending sort on scores that are already populated.
pub fn sort_by_score(mut quotes: Vec<Quote>) -> Vec<Quote> {
    quotes.sort_by(|a, b| a.rank_score.total_cmp(&b.rank_score));
    quotes
}
