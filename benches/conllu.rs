use divan::{Bencher, black_box};
use typdep::{ConllUReader, DependencyReader};

fn main() {
    divan::main();
}

const SENTENCE: &str = "# text = The dog runs.
1\tThe\tthe\tDET\tDT\tDefinite=Def|PronType=Art\t2\tdet\t_\t_
2\tdog\tdog\tNOUN\tNN\tNumber=Sing\t3\tnsubj\t_\t_
3\truns\trun\tVERB\tVBZ\tMood=Ind|Number=Sing|Person=3\t0\troot\t_\tSpaceAfter=No
4\t.\t.\tPUNCT\t.\t_\t3\tpunct\t_\t_

";

/// Benchmark reading a synthetic treebank of repeated sentences
#[divan::bench(args = [100, 10_000])]
fn read_instances(bencher: Bencher, sentences: usize) {
    let text = SENTENCE.repeat(sentences);
    bencher.bench_local(|| {
        let reader = ConllUReader::from_text(black_box(&text));
        for result in reader.instances() {
            black_box(result.unwrap());
        }
    });
}
