pub fn voltage(is_query: bool, parameter: &str) {
    if is_query {
        println!("voltage | query");
    } else {
        println!("voltage | set: [{}]", parameter);
    }
}

pub fn current(is_query: bool, parameter: &str) {
    if is_query {
        println!("current | query");
    } else {
        println!("current | set: [{}]", parameter);
    }
}
