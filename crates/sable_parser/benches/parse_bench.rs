use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sable_core::intern::StringInterner;
use sable_parser::Parser;
use sable_scanner::TokenStream;

// A medium-size module (~90 lines) exercising interfaces, classes,
// generics, arrows, and module syntax.
const SOURCE: &str = r#"
interface User {
    id: number;
    name: string;
    email: string;
    age?: number;
    preferences: UserPreferences;
}

interface UserPreferences {
    theme: 'light' | 'dark';
    notifications: boolean;
    language: string;
}

type UserID = number;
type UserMap = Map<UserID, User>;

class UserService {
    private users: UserMap;
    private nextId: UserID;

    constructor() {
        this.users = new Map();
        this.nextId = 1;
    }

    createUser(name: string, email: string): User {
        const user: User = {
            id: this.nextId++,
            name,
            email,
            preferences: {
                theme: 'light',
                notifications: true,
                language: 'en'
            }
        };
        this.users.set(user.id, user);
        return user;
    }

    getUserById(id: UserID): User | undefined {
        return this.users.get(id);
    }

    updateUser(id: UserID, updates: User): boolean {
        const user = this.users.get(id);
        if (!user) return false;
        this.users.set(id, { ...user, ...updates });
        return true;
    }

    getAllUsers(): User[] {
        return Array.from(this.users.values());
    }
}

function filterUsers<T extends User>(
    users: T[],
    predicate: (user: T) => boolean
): T[] {
    return users.filter(predicate);
}

async function fetchUserData(id: UserID): Promise<User | null> {
    const service = new UserService();
    return service.getUserById(id) || null;
}

const countAdults = (users: User[]): number => {
    return users.reduce((count, user) => {
        if (user.age && user.age > 18) {
            return count + 1;
        }
        return count;
    }, 0);
};

export { UserService, filterUsers, fetchUserData };
export type { UserID, UserMap };
export default UserService;
"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_module_medium", |b| {
        let interner = StringInterner::new();
        b.iter(|| {
            let arena = Bump::new();
            let (tokens, _) = sable_scanner::tokenize(black_box(SOURCE));
            let mut parser = Parser::new(&arena, TokenStream::new(tokens), &interner);
            let program = parser.parse_program().expect("bench source parses");
            black_box(program.statements.len());
        });
    });
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_module_medium", |b| {
        b.iter(|| {
            let (tokens, _) = sable_scanner::tokenize(black_box(SOURCE));
            black_box(tokens.len());
        });
    });
}

criterion_group!(benches, bench_parse, bench_tokenize);
criterion_main!(benches);
