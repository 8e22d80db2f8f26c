use outbreak::{CaseTable, Error, FeatureExtractor, Point, SingleLinkage};

const TABLE: &str = "\
Province/State,Country/Region,Lat,Long,3/1/20,3/2/20,3/3/20,3/4/20,3/5/20,3/6/20
,Alpha,10.0,20.0,0,1,5,50,200,1000
,Beta,11.0,21.0,0,0,0,0,0,0
Northern,Gamma,12.0,22.0,0,2,10,60,300,1000
,Delta,13.0,23.0,1,2,4,8,16,500
\"Island, Outer\",Epsilon,14.0,24.0,500,600,700,800,900,1000
";

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn csv_to_linkage_tree() {
    init_logging();

    let table = CaseTable::from_reader(TABLE.as_bytes()).unwrap();
    assert_eq!(table.regions().len(), 5);
    assert_eq!(table.regions()[2].label(), "Northern, Gamma");

    let features = FeatureExtractor::new().extract(&table).unwrap();
    // Alpha: thresholds 100 (3/5) and 10 (3/4).
    assert_eq!(features[0], Some(Point::new(2.0, 3.0)));
    // Beta never has cases.
    assert_eq!(features[1], None);
    // Gamma: thresholds 100 (3/5) and 10 (3/3).
    assert_eq!(features[2], Some(Point::new(2.0, 4.0)));
    // Delta: thresholds 50 (3/6) and 5 (3/4).
    assert_eq!(features[3], Some(Point::new(1.0, 3.0)));
    // Epsilon is already past both thresholds on the first day.
    assert_eq!(features[4], None);

    let tree = SingleLinkage::new().fit(&features).unwrap();
    assert_eq!(tree.n_leaves(), 3);
    assert_eq!(tree.leaf_sources(), &[0, 2, 3]);

    // Leaves: 0 = Alpha (2, 3), 1 = Gamma (2, 4), 2 = Delta (1, 3).
    // (0, 1) and (0, 2) are both at distance 1; (0, 1) is scanned first.
    let records = tree.records();
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].cluster_a, records[0].cluster_b), (0, 1));
    assert_eq!(records[0].distance, 1.0);
    assert_eq!(records[0].size, 2);
    assert_eq!((records[1].cluster_a, records[1].cluster_b), (2, 3));
    assert_eq!(records[1].distance, 1.0);
    assert_eq!(records[1].size, 3);

    let labels = tree.cut(2).unwrap();
    assert_eq!(labels, vec![0, 0, 1]);
}

#[test]
fn table_from_missing_path_is_io_error() {
    init_logging();

    let err = CaseTable::from_path("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn non_finite_feature_is_distinguishable_from_empty_result() {
    init_logging();

    let empty = SingleLinkage::new().fit(&[None, None]).unwrap();
    assert!(empty.is_empty());

    let err = SingleLinkage::new()
        .fit(&[Some(Point::new(0.0, 0.0)), Some(Point::new(1.0, f64::NAN))])
        .unwrap_err();
    assert!(matches!(err, Error::NonFiniteCoordinate { index: 1, .. }));
}
