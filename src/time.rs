use ::time as time_crate;
use log::info;

pub fn report_time<Out, F: FnOnce() -> Out>(name: &str, f: F) -> Out {
    let start = time_crate::now();
    info!("starting {}", name);
    let res = f();
    info!("done {} - took: {}", name, (time_crate::now() - start));
    res
}

pub fn measure<Out, F: FnOnce() -> Out>(f: F) -> (Out, time_crate::Duration) {
    let start = time_crate::now();
    let res = f();
    (res, time_crate::now() - start)
}
