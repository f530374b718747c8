// src/normalize/apartment.rs

//! Apartment normalizer.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::models::{EstateKind, NormalizedEstate, RawListing, Rooms};
use crate::services::{features, prices};

use super::common::{self, clean_section, finishing};
use super::{NormalizeContext, Normalizer};

/// Attribute names of the form "Цена при ..." carry a conditional price.
const PRICE_CONDITION: &str = "Цена при";

pub struct ApartmentNormalizer<'a> {
    ctx: NormalizeContext<'a>,
}

impl<'a> ApartmentNormalizer<'a> {
    pub fn new(ctx: NormalizeContext<'a>) -> Self {
        Self { ctx }
    }
}

impl Normalizer for ApartmentNormalizer<'_> {
    fn kind(&self) -> EstateKind {
        EstateKind::Apartment
    }

    fn normalize(&self, listing: &RawListing) -> Result<NormalizedEstate> {
        let mut estate = common::base_estate(&self.ctx, listing, self.kind(), ',')?;

        estate.rooms = if listing.studio == Some(true) {
            Some(Rooms::Studio)
        } else {
            listing.rooms_amount.map(Rooms::Count)
        };
        estate.section = listing
            .section
            .as_deref()
            .and_then(|s| clean_section(s, &["секция"]));
        estate.living_area = listing.area.area_living.filter(|a| !a.is_zero());
        estate.view = listing
            .custom_field("window")
            .filter(|f| f.has_value())
            .map(|f| f.text());

        let (finished, finishing_name) = finishing(listing);
        estate.finished = finished;

        let quote = prices::resolve(listing);
        let (sale, from_offer) = match conditional_price(listing)? {
            Some(condition) => {
                estate.sale = Some(condition.name);
                let price = condition
                    .price
                    .and_then(|p| prices::sale_against(quote.base, p));
                (price, false)
            }
            None => {
                estate.sale = quote.offers.clone();
                (quote.sale, true)
            }
        };

        if finished == Some(true) {
            estate.price_finished = quote.base;
            estate.price_finished_sale = sale;
            estate.finishing_name = finishing_name;
        } else {
            estate.price_base = quote.base;
            estate.price_sale = sale;
        }
        estate.discount = prices::discount(quote.base, sale);
        if from_offer {
            estate.discount_percent = quote.discount_percent;
        }

        let classification = features::classify(&listing.custom_fields)?;
        estate.feature = classification.labels();
        if let Some(view) = classification.view {
            estate.view = Some(view);
        }

        Ok(estate)
    }
}

/// A "price when <condition>" attribute.
#[derive(Debug, Clone, PartialEq)]
struct ConditionalPrice {
    name: String,
    price: Option<Decimal>,
}

/// The last conditional-price attribute; it replaces any offer price.
fn conditional_price(listing: &RawListing) -> Result<Option<ConditionalPrice>> {
    let Some(field) = listing
        .custom_fields
        .iter()
        .rev()
        .find(|f| f.name.contains(PRICE_CONDITION))
    else {
        return Ok(None);
    };

    let price = if field.has_value() {
        Some(parse_amount(&field.name, &field.text())?)
    } else {
        None
    };

    Ok(Some(ConditionalPrice {
        name: field.name.clone(),
        price,
    }))
}

/// Read `"4 500 000,50"`-style amounts.
fn parse_amount(field: &str, text: &str) -> Result<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    Decimal::from_str(&cleaned).map_err(|_| AppError::invalid_price(field, text))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::models::{EndQuarter, House};
    use crate::services::CommissioningIndex;

    fn index() -> CommissioningIndex {
        CommissioningIndex::from_houses(&[House {
            id: 10,
            building_state: Some("UNFINISHED".into()),
            development_end_quarter: Some(EndQuarter {
                quarter: 2,
                year: 2026,
            }),
        }])
        .unwrap()
    }

    fn listing(overrides: Value) -> RawListing {
        let mut base = json!({
            "id": 501,
            "house_id": 10,
            "projectName": "Анаполис",
            "houseName": "1 очередь, Дом №3",
            "number": "45",
            "section": "Секция 2",
            "floor": 5,
            "studio": false,
            "rooms_amount": 2,
            "status": "AVAILABLE",
            "area": {"area_total": 54.3, "area_living": 30.1},
            "price": {"value": 6_000_000},
            "planImages": [{"source": "https://cdn.example/plan-45.png"}],
            "custom_fields": [],
            "specialOffers": []
        });
        if let (Some(target), Some(extra)) = (base.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(base).unwrap()
    }

    fn normalize(listing: &RawListing) -> Result<NormalizedEstate> {
        let commissioning = index();
        let ctx = NormalizeContext {
            site: "https://anapolisdom.ru/",
            region: "Анапа",
            commissioning: &commissioning,
        };
        ApartmentNormalizer::new(ctx).normalize(listing)
    }

    #[test]
    fn test_unfinished_apartment() {
        let estate = normalize(&listing(json!({}))).unwrap();

        assert_eq!(estate.kind, Some(EstateKind::Apartment));
        assert_eq!(estate.complex.as_deref(), Some("Анаполис (Анапа)"));
        assert_eq!(estate.phase.as_deref(), Some("1"));
        assert_eq!(estate.building.as_deref(), Some("3"));
        assert_eq!(estate.section.as_deref(), Some("2"));
        assert_eq!(estate.number.as_deref(), Some("45"));
        assert_eq!(estate.rooms, Some(Rooms::Count(2)));
        assert_eq!(estate.living_area, Some(Decimal::new(301, 1)));
        assert_eq!(estate.commissioning.as_deref(), Some("II кв 2026"));
        assert_eq!(estate.sale_status.as_deref(), Some("Свободно"));
        assert_eq!(estate.in_sale, Some(true));
        assert_eq!(estate.price_base, Some(Decimal::from(6_000_000)));
        assert_eq!(estate.price_finished, None);
        assert_eq!(estate.price_sale, None);
        assert_eq!(estate.feature, None);
        assert_eq!(
            estate.flat_url.as_deref(),
            Some("https://anapolisdom.ru/#/profitbase/house/10/list?propertyId=501")
        );
    }

    #[test]
    fn test_studio_wins_over_room_count() {
        let estate = normalize(&listing(json!({"studio": true, "rooms_amount": 1}))).unwrap();
        assert_eq!(estate.rooms, Some(Rooms::Studio));
    }

    #[test]
    fn test_zero_living_area_is_absent() {
        let estate =
            normalize(&listing(json!({"area": {"area_total": 25, "area_living": 0}}))).unwrap();
        assert_eq!(estate.living_area, None);
    }

    #[test]
    fn test_finished_routes_to_finished_prices() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "facing", "name": "Отделка", "value": "Чистовая"}],
            "specialOffers": [{
                "name": "Скидка",
                "discount": {"unit": "percent", "value": 5, "calculate": {"price": 5_700_000}}
            }]
        })))
        .unwrap();

        assert_eq!(estate.finished, Some(true));
        assert_eq!(estate.finishing_name.as_deref(), Some("Чистовая"));
        assert_eq!(estate.price_base, None);
        assert_eq!(estate.price_sale, None);
        assert_eq!(estate.price_finished, Some(Decimal::from(6_000_000)));
        assert_eq!(estate.price_finished_sale, Some(Decimal::from(5_700_000)));
        assert_eq!(estate.discount, Some(Decimal::from(300_000)));
        assert_eq!(estate.discount_percent, Some(Decimal::from(5)));
        assert_eq!(estate.sale.as_deref(), Some("Скидка 5700000"));
    }

    #[test]
    fn test_without_finishing_routes_to_base_prices() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "facing", "name": "Отделка", "value": "Без отделки"}]
        })))
        .unwrap();

        assert_eq!(estate.finished, Some(false));
        assert_eq!(estate.finishing_name, None);
        assert_eq!(estate.price_base, Some(Decimal::from(6_000_000)));
        assert_eq!(estate.price_finished, None);
    }

    #[test]
    fn test_conditional_price_overrides_offer() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "cp", "name": "Цена при 100% оплате", "value": "5 400 000"}],
            "specialOffers": [{
                "name": "Скидка",
                "discount": {"unit": "percent", "value": 5, "calculate": {"price": 5_700_000}}
            }]
        })))
        .unwrap();

        assert_eq!(estate.price_sale, Some(Decimal::from(5_400_000)));
        assert_eq!(estate.sale.as_deref(), Some("Цена при 100% оплате"));
        assert_eq!(estate.discount, Some(Decimal::from(600_000)));
        assert_eq!(estate.discount_percent, None);
    }

    #[test]
    fn test_empty_conditional_price_clears_sale() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "cp", "name": "Цена при ипотеке", "value": null}],
            "specialOffers": [{
                "name": "Скидка",
                "discount": {"unit": "percent", "value": 5, "calculate": {"price": 5_700_000}}
            }]
        })))
        .unwrap();

        assert_eq!(estate.price_sale, None);
        assert_eq!(estate.sale.as_deref(), Some("Цена при ипотеке"));
    }

    #[test]
    fn test_conditional_price_equal_to_base_is_no_sale() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "cp", "name": "Цена при 100% оплате", "value": "6 000 000"}]
        })))
        .unwrap();

        assert_eq!(estate.price_base, Some(Decimal::from(6_000_000)));
        assert_eq!(estate.price_sale, None);
        assert_eq!(estate.discount, None);
        assert_eq!(estate.discount_percent, None);
    }

    #[test]
    fn test_missing_base_carries_no_sale_price() {
        let offer = json!([{
            "name": "Скидка",
            "discount": {"unit": "percent", "value": 5, "calculate": {"price": 5_700_000}}
        }]);
        let conditional = json!([{"id": "cp", "name": "Цена при ипотеке", "value": "5 400 000"}]);
        let finished = json!([
            {"id": "facing", "name": "Отделка", "value": "Чистовая"},
            {"id": "cp", "name": "Цена при ипотеке", "value": "5 400 000"}
        ]);

        for (price, fields, offers) in [
            (json!(0), json!([]), offer.clone()),
            (json!(null), json!([]), offer.clone()),
            (json!(0), conditional, json!([])),
            (json!(0), finished, offer),
        ] {
            let estate = normalize(&listing(json!({
                "price": {"value": price},
                "custom_fields": fields,
                "specialOffers": offers
            })))
            .unwrap();

            assert_eq!(estate.price_base, None);
            assert_eq!(estate.price_finished, None);
            assert_eq!(estate.price_sale, None);
            assert_eq!(estate.price_finished_sale, None);
            assert_eq!(estate.discount, None);
            assert_eq!(estate.discount_percent, None);
            assert!(!estate.has_price());
        }
    }

    #[test]
    fn test_feature_list_comes_from_classification_only() {
        let estate = normalize(&listing(json!({
            "custom_fields": [
                {"id": "f1", "name": "Балкон", "value": "Есть"},
                {"id": "f2", "name": "Вид на парк", "value": "Есть"}
            ]
        })))
        .unwrap();
        assert_eq!(estate.feature, Some(vec!["Балкон".to_string()]));

        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "f2", "name": "Вид на парк", "value": "Есть"}]
        })))
        .unwrap();
        assert_eq!(estate.feature, None);
        assert_eq!(estate.view.as_deref(), Some("Вид на парк"));
    }

    #[test]
    fn test_invalid_conditional_price_is_fatal() {
        let err = normalize(&listing(json!({
            "custom_fields": [{"id": "cp", "name": "Цена при ипотеке", "value": "по запросу"}]
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidPrice { .. }));
    }

    #[test]
    fn test_features_and_view() {
        let estate = normalize(&listing(json!({
            "custom_fields": [
                {"id": "window", "name": "Окна", "value": "Во двор"},
                {"id": "f1", "name": "Балкон", "value": "Есть"},
                {"id": "f2", "name": "Гардеробная", "value": "Есть"},
                {"id": "f3", "name": "Вид на море", "value": "Есть"}
            ]
        })))
        .unwrap();

        assert_eq!(
            estate.feature,
            Some(vec!["Балкон".to_string(), "Гардеробная".to_string()])
        );
        assert_eq!(estate.view.as_deref(), Some("Вид на море"));
    }

    #[test]
    fn test_window_field_is_view_without_view_feature() {
        let estate = normalize(&listing(json!({
            "custom_fields": [{"id": "window", "name": "Окна", "value": "Во двор"}]
        })))
        .unwrap();
        assert_eq!(estate.view.as_deref(), Some("Во двор"));
    }

    #[test]
    fn test_unknown_feature_aborts() {
        let err = normalize(&listing(json!({
            "custom_fields": [{"id": "f9", "name": "Сауна", "value": "Есть"}]
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::UnknownFeature { .. }));
    }

    #[test]
    fn test_unknown_status_aborts() {
        let err = normalize(&listing(json!({"status": "RESERVED"}))).unwrap_err();
        assert!(matches!(err, AppError::UnknownStatus(_)));
    }

    #[test]
    fn test_missing_house_aborts() {
        let err = normalize(&listing(json!({"house_id": 99}))).unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingCommissioning { house_id: 99, .. }
        ));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(
            parse_amount("f", "4 500 000,50").unwrap(),
            Decimal::new(450_000_050, 2)
        );
        assert!(parse_amount("f", "n/a").is_err());
    }
}
