use block_deque::Deque;

fn main() {
    let mut d = Deque::new();
    for round in 0..100_000u32 {
        d.clear();
        for i in std::hint::black_box(0..256u32) {
            if (i ^ round) & 1 == 0 {
                d.push_back(i);
            } else {
                d.push_front(i);
            }
        }
        while d.len() > 128 {
            d.pop_front();
            d.pop_back();
        }
        std::hint::black_box(d[64]);
    }
}
