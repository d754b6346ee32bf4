use duct_flow_toolbox::units::{convert_flow, FlowQuantity, ResultUnit, TimeUnit};

#[test]
fn time_base_conversion() {
    assert_eq!(convert_flow(1.0, TimeUnit::Second), 1.0);
    assert_eq!(convert_flow(1.0, TimeUnit::Minute), 60.0);
    assert_eq!(convert_flow(1.0, TimeUnit::Hour), 3600.0);
    // 표시값은 소수점 셋째 자리까지
    assert_eq!(convert_flow(0.06755974552975108, TimeUnit::Second), 0.068);
    assert_eq!(convert_flow(0.06755974552975108, TimeUnit::Hour), 243.215);
}

#[test]
fn result_units_parse_symbols_and_menu_codes() {
    assert_eq!("m3/h".parse::<ResultUnit>(), Ok(ResultUnit::CubicMeterPerHour));
    assert_eq!("M³/MIN".parse::<ResultUnit>(), Ok(ResultUnit::CubicMeterPerMinute));
    assert_eq!(" kg/s ".parse::<ResultUnit>(), Ok(ResultUnit::KilogramPerSecond));
    assert_eq!("6".parse::<ResultUnit>(), Ok(ResultUnit::KilogramPerHour));
    assert!("7".parse::<ResultUnit>().is_err());
    assert!("l/s".parse::<ResultUnit>().is_err());
}

#[test]
fn menu_codes_cover_all_units_in_order() {
    for (idx, unit) in ResultUnit::ALL.into_iter().enumerate() {
        assert_eq!(unit.menu_code() as usize, idx + 1);
        assert_eq!(ResultUnit::from_menu_code(unit.menu_code()), Some(unit));
    }
    assert_eq!(ResultUnit::from_menu_code(0), None);
    assert_eq!(ResultUnit::KilogramPerMinute.quantity(), FlowQuantity::Mass);
    assert_eq!(
        ResultUnit::CubicMeterPerMinute.time_unit(),
        TimeUnit::Minute
    );
    assert_eq!(ResultUnit::KilogramPerHour.to_string(), "kg/h");
}
