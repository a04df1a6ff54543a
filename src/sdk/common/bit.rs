#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1 << $x
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $v:expr, $m:expr ) => {
        $v |= $m
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $v:expr, $m:expr ) => {
        $v &= !$m
    };
}

#[macro_export]
macro_rules! BM_TOGGLE {
    ( $v:expr, $m:expr ) => {
        $v ^= $m
    };
}
