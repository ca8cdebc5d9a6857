#[cfg(test)]
mod tests {
    use crate::error::MrwError;
    use crate::logic::{build_picking_request, resolve_service};
    use chrono::NaiveDate;
    use shipflow_common::models::{DeliveryAddress, Party, RequestPayload, Shipment};
    use shipflow_config::{MrwConfig, WeightUnit};

    fn config() -> MrwConfig {
        MrwConfig {
            username: "sagec".to_string(),
            password: "secret".to_string(),
            franchise: "01601".to_string(),
            subscriber: "500001".to_string(),
            department: String::new(),
            endpoint: None,
            debug: true,
            timeout_secs: Some(30),
            send_weight: true,
            weight_unit: Some(WeightUnit::Kg),
            default_weight_unit: None,
            reference_origin: false,
            service: None,
            default_service: Some("0800".to_string()),
        }
    }

    fn shipment(code: &str) -> Shipment {
        Shipment {
            code: code.to_string(),
            origin: None,
            customer: Party {
                name: "Señora Muñoz".to_string(),
                vat_number: "B12345678".to_string(),
                phone: Some("91 555 44 33".to_string()),
            },
            delivery_address: DeliveryAddress {
                name: None,
                street: "Calle Alcalá 23".to_string(),
                zip: "28014".to_string(),
                city: "Madrid".to_string(),
                phone: None,
            },
            packages: 2,
            weight: Some(3.2),
            weight_unit: None,
            cash_on_delivery: false,
            cod_amount: None,
            carrier_notes: None,
            carrier_service: None,
            carrier_tracking_ref: None,
        }
    }

    fn send_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn build(config: &MrwConfig, shipment: &Shipment) -> RequestPayload {
        build_picking_request(config, shipment, config.default_carrier_service(), send_date())
            .unwrap()
    }

    #[test]
    fn always_present_fields() {
        let config = config();
        let data = build(&config, &shipment("S-001"));

        assert_eq!(data.get("via"), Some("Calle Alcala 23"));
        assert_eq!(data.get("codigo_postal"), Some("28014"));
        assert_eq!(data.get("poblacion"), Some("Madrid"));
        assert_eq!(data.get("nif"), Some("B12345678"));
        assert_eq!(data.get("nombre"), Some("Senora Munoz"));
        assert_eq!(data.get("telefono"), Some("915554433"));
        assert_eq!(data.get("contacto"), Some("Senora Munoz"));
        assert_eq!(data.get("atencion_de"), Some("Senora Munoz"));
        assert_eq!(data.get("observaciones"), Some(""));
        assert_eq!(data.get("fecha"), Some("02/03/2026"));
        assert_eq!(data.get("referencia"), Some("S-001"));
        assert_eq!(data.get("codigo_servicio"), Some("0800"));
        assert_eq!(data.get("bultos"), Some("2"));
    }

    #[test]
    fn zero_packages_coerced_to_one() {
        let config = config();
        let mut shipment = shipment("S-002");
        shipment.packages = 0;

        let data = build(&config, &shipment);
        assert_eq!(data.get("bultos"), Some("1"));
    }

    #[test]
    fn diacritics_are_stripped_from_notes_and_address_name() {
        let config = config();
        let mut shipment = shipment("S-003");
        shipment.carrier_notes = Some("Entregar en portería, ático".to_string());
        shipment.delivery_address.name = Some("José García".to_string());
        shipment.delivery_address.city = "Córdoba".to_string();

        let data = build(&config, &shipment);
        assert_eq!(data.get("observaciones"), Some("Entregar en porteria, atico"));
        assert_eq!(data.get("contacto"), Some("Jose Garcia"));
        assert_eq!(data.get("atencion_de"), Some("Jose Garcia"));
        assert_eq!(data.get("poblacion"), Some("Cordoba"));
    }

    #[test]
    fn weight_rounded_and_zero_coerced_to_one() {
        let config = config();
        let mut shipment = shipment("S-004");
        shipment.weight = Some(0.0);

        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("1"));

        shipment.weight = Some(3.6);
        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("4"));
    }

    #[test]
    fn weight_converted_from_shipment_unit() {
        let config = config();
        let mut shipment = shipment("S-005");
        shipment.weight = Some(2500.0);
        shipment.weight_unit = Some(WeightUnit::G);

        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("3")); // 2.5 kg rounds up

        // 400 g converts to 0.4 kg and rounds to zero, which is coerced.
        shipment.weight = Some(400.0);
        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("1"));
    }

    #[test]
    fn weight_converted_from_config_default_unit() {
        let mut config = config();
        config.default_weight_unit = Some(WeightUnit::G);
        let mut shipment = shipment("S-006");
        shipment.weight = Some(1800.0);
        shipment.weight_unit = None;

        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("2"));
    }

    #[test]
    fn weight_untouched_without_target_unit() {
        let mut config = config();
        config.weight_unit = None;
        let mut shipment = shipment("S-007");
        shipment.weight = Some(1800.0);
        shipment.weight_unit = Some(WeightUnit::G);

        let data = build(&config, &shipment);
        assert_eq!(data.get("peso"), Some("1800"));
    }

    #[test]
    fn weight_omitted_when_not_transmitted() {
        let mut config = config();
        config.send_weight = false;
        let data = build(&config, &shipment("S-008"));
        assert!(!data.contains("peso"));

        let config = self::config();
        let mut shipment = shipment("S-008");
        shipment.weight = None;
        let data = build(&config, &shipment);
        assert!(!data.contains("peso"));
    }

    #[test]
    fn cod_amount_uses_comma_separator() {
        let config = config();
        let mut shipment = shipment("S-009");
        shipment.cash_on_delivery = true;
        shipment.cod_amount = Some(12.5);

        let data = build(&config, &shipment);
        assert_eq!(data.get("reembolso"), Some("O"));
        assert_eq!(data.get("importe_reembolso"), Some("12,50"));
    }

    #[test]
    fn non_cod_shipment_has_no_reimbursement_fields() {
        let config = config();
        let data = build(&config, &shipment("S-010"));
        assert!(!data.contains("reembolso"));
        assert!(!data.contains("importe_reembolso"));
    }

    #[test]
    fn cod_without_amount_fails() {
        let config = config();
        let mut shipment = shipment("S-011");
        shipment.cash_on_delivery = true;
        shipment.cod_amount = None;

        let err = build_picking_request(
            &config,
            &shipment,
            config.default_carrier_service(),
            send_date(),
        )
        .unwrap_err();
        assert!(matches!(err, MrwError::CodWithoutAmount { .. }));
    }

    #[test]
    fn origin_used_as_reference_when_configured() {
        let mut config = config();
        config.reference_origin = true;
        let mut shipment = shipment("S-012");
        shipment.origin = Some("SO-77".to_string());

        let data = build(&config, &shipment);
        assert_eq!(data.get("referencia"), Some("SO-77"));

        // Without an origin the shipment code stays in place.
        shipment.origin = None;
        let data = build(&config, &shipment);
        assert_eq!(data.get("referencia"), Some("S-012"));
    }

    #[test]
    fn service_resolution_prefers_shipment_over_carrier_over_default() {
        let mut config = config();
        config.service = Some("0810".to_string());
        let mut shipment = shipment("S-013");

        assert_eq!(
            resolve_service(&config, &shipment, config.default_carrier_service()),
            Some("0810")
        );

        shipment.carrier_service = Some("0005".to_string());
        assert_eq!(
            resolve_service(&config, &shipment, config.default_carrier_service()),
            Some("0005")
        );

        let mut bare = self::config();
        bare.service = None;
        bare.default_service = None;
        let shipment = self::shipment("S-013");
        assert_eq!(resolve_service(&bare, &shipment, None), None);
    }

    #[test]
    fn missing_service_fails_fast() {
        let mut config = config();
        config.service = None;
        config.default_service = None;

        let err = build_picking_request(&config, &shipment("S-014"), None, send_date())
            .unwrap_err();
        assert!(matches!(err, MrwError::MissingService));
    }

    #[test]
    fn missing_phone_fails() {
        let config = config();
        let mut shipment = shipment("S-015");
        shipment.customer.phone = Some("   ".to_string());
        shipment.delivery_address.phone = None;

        let err = build_picking_request(
            &config,
            &shipment,
            config.default_carrier_service(),
            send_date(),
        )
        .unwrap_err();
        assert!(matches!(err, MrwError::MissingPhone { .. }));
    }

    #[test]
    fn builder_is_a_pure_function_of_its_inputs() {
        let config = config();
        let shipment = shipment("S-016");

        let first = build(&config, &shipment);
        let second = build(&config, &shipment);
        assert_eq!(first, second);
    }
}
